use jiff::SignedDuration;

/// Per-resource fetch behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceOptions {
    /// Keep showing the last successful data while a refetch is in flight
    /// instead of dropping back to `Loading`.
    pub keep_previous_data_while_refetching: bool,
    /// Refetches within this window of the last success are no-ops. `None`
    /// makes every refetch hit the network.
    pub stale_time: Option<SignedDuration>,
}

impl ResourceOptions {
    /// Lists: previous data stays on screen during refetches.
    pub const fn list() -> Self {
        Self {
            keep_previous_data_while_refetching: true,
            stale_time: None,
        }
    }

    /// Detail views: stale data would be misleading, so refetches show the
    /// loading state.
    pub const fn detail() -> Self {
        Self {
            keep_previous_data_while_refetching: false,
            stale_time: None,
        }
    }

    pub const fn stale_time(mut self, stale_time: SignedDuration) -> Self {
        self.stale_time = Some(stale_time);
        self
    }

    pub const fn keep_previous_data(mut self, keep: bool) -> Self {
        self.keep_previous_data_while_refetching = keep;
        self
    }
}

impl Default for ResourceOptions {
    fn default() -> Self {
        Self::list()
    }
}
