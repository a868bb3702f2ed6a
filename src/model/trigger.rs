use std::fmt;

/// Page lifecycle event that starts a polling loop.
///
/// Both may fire on the same page load. Each one gets its own loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Trigger {
    DomReady,
    WindowLoad,
}

impl Trigger {
    /// Log line written when the trigger fires.
    pub fn announcement(&self) -> &'static str {
        match self {
            Trigger::DomReady => "DOM loaded, waiting for cart",
            Trigger::WindowLoad => "Window fully loaded, checking cart again",
        }
    }
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Trigger::DomReady => f.write_str("dom_ready"),
            Trigger::WindowLoad => f.write_str("window_load"),
        }
    }
}
