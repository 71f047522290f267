//! Module lifecycle hooks.
//!
//! The host module runtime notifies a module as its context refreshes and
//! as it starts and stops. The UI module only logs these transitions.

/// Callbacks invoked by the host module runtime.
///
/// Every hook defaults to doing nothing.
pub trait ModuleActivator {
    /// The host application context is about to refresh.
    fn will_refresh_context(&self) {}

    /// The host application context has refreshed.
    fn context_refreshed(&self) {}

    /// The module is about to start.
    fn will_start(&self) {}

    /// The module has started.
    fn started(&self) {}

    /// The module is about to stop.
    fn will_stop(&self) {}

    /// The module has stopped.
    fn stopped(&self) {}
}

/// Lifecycle phase reported by [`UiModuleActivator`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecyclePhase {
    /// Context refresh pending
    Refreshing,
    /// Context refreshed
    Refreshed,
    /// Start pending
    Starting,
    /// Started
    Started,
    /// Stop pending
    Stopping,
    /// Stopped
    Stopped,
}

impl std::fmt::Display for LifecyclePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            LifecyclePhase::Refreshing => "refreshing",
            LifecyclePhase::Refreshed => "refreshed",
            LifecyclePhase::Starting => "starting",
            LifecyclePhase::Started => "started",
            LifecyclePhase::Stopping => "stopping",
            LifecyclePhase::Stopped => "stopped",
        };
        f.write_str(s)
    }
}

/// Activator for the UI module; logs each lifecycle transition.
#[derive(Debug, Clone)]
pub struct UiModuleActivator {
    module: String,
}

impl UiModuleActivator {
    /// Creates an activator for the named module.
    pub fn new(module: impl Into<String>) -> Self {
        Self {
            module: module.into(),
        }
    }

    /// Name of the module.
    pub fn module(&self) -> &str {
        &self.module
    }

    fn log(&self, phase: LifecyclePhase) {
        tracing::info!(module = %self.module, phase = %phase, "module {}", phase);
    }
}

impl Default for UiModuleActivator {
    fn default() -> Self {
        Self::new("ui")
    }
}

impl ModuleActivator for UiModuleActivator {
    fn will_refresh_context(&self) {
        self.log(LifecyclePhase::Refreshing);
    }

    fn context_refreshed(&self) {
        self.log(LifecyclePhase::Refreshed);
    }

    fn will_start(&self) {
        self.log(LifecyclePhase::Starting);
    }

    fn started(&self) {
        self.log(LifecyclePhase::Started);
    }

    fn will_stop(&self) {
        self.log(LifecyclePhase::Stopping);
    }

    fn stopped(&self) {
        self.log(LifecyclePhase::Stopped);
    }
}
