//! The injected provider handle as a [`ProviderSource`].

use walletgate_core::{ProviderFlags, ProviderSource};

use crate::core::ethereum;

/// Reads `window.ethereum` each time it is asked.
#[derive(Clone, Copy, Debug, Default)]
pub struct WindowProvider;

impl ProviderSource for WindowProvider {
    fn read(&self) -> Option<ProviderFlags> {
        ethereum::get_ethereum()
            .ok()
            .map(|ethereum| ethereum::read_flags(&ethereum))
    }
}
