use std::collections::BTreeMap;

use crate::errors::PanelError;
use crate::panel::{PanelCtx, PanelEffect, PanelIntent, SidebarPanel};

/// Name to panel directory, so any part of the shell can drive a panel by
/// its configured name.
#[derive(Debug, Default)]
pub struct PanelRegistry {
    panels: BTreeMap<String, SidebarPanel>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start `panel` and register it under its name. The first registration
    /// of a name wins; later ones are rejected and never started.
    pub fn mount(
        &mut self,
        mut panel: SidebarPanel,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<(), PanelError> {
        let name = panel.name().to_string();
        if self.panels.contains_key(&name) {
            log::warn!(
                "panel '{name}' already exists, unmount it first or use a unique name"
            );
            return Err(PanelError::DuplicateName(name));
        }

        panel.start(ctx)?;
        self.panels.insert(name, panel);
        Ok(())
    }

    /// Stop the named panel and unregister it.
    pub fn unmount(
        &mut self,
        name: &str,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        let Some(panel) = self.panels.get_mut(name) else {
            log::warn!("panel '{name}' doesn't exist in the registry");
            return Ok(Vec::new());
        };

        let effects = panel.stop(ctx)?;
        self.panels.remove(name);
        Ok(effects)
    }

    pub fn get(&self, name: &str) -> Option<&SidebarPanel> {
        self.panels.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.panels.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.panels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Run `intent` against the named panel. Unknown names are ignored.
    pub fn dispatch(
        &mut self,
        name: &str,
        intent: PanelIntent,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<PanelEffect>, PanelError> {
        match self.panels.get_mut(name) {
            Some(panel) => panel.reduce(intent, ctx),
            None => {
                log::warn!("panel '{name}' doesn't exist in the registry");
                Ok(Vec::new())
            },
        }
    }

    /// Deliver `intent` to every panel, collecting effects per panel name.
    pub fn broadcast(
        &mut self,
        intent: PanelIntent,
        ctx: &mut PanelCtx<'_>,
    ) -> Result<Vec<(String, PanelEffect)>, PanelError> {
        let mut collected = Vec::new();
        for (name, panel) in &mut self.panels {
            for effect in panel.reduce(intent, ctx)? {
                collected.push((name.clone(), effect));
            }
        }
        Ok(collected)
    }
}
