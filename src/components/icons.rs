//! Centralized icon definitions.
//!
//! Icon theme is configured in `config.rs` via `ICON_THEME`.
//! This module maps semantic icon names to the selected theme's icons.

use icondata::Icon;

use crate::config::IconTheme;

// =============================================================================
// Theme Imports
// =============================================================================

mod lucide {
    pub use icondata::{
        LuBug as Debug, LuExternalLink as ExternalLink, LuEye as Demo, LuGlobe as Network,
        LuLock as Lock, LuLogOut as Disconnect, LuUser as User, LuWallet as Wallet,
        LuX as Close,
    };
}

mod bootstrap {
    pub use icondata::{
        BsBoxArrowRight as Disconnect, BsBoxArrowUpRight as ExternalLink, BsBug as Debug,
        BsEye as Demo, BsGlobe as Network, BsLockFill as Lock, BsPerson as User,
        BsWallet2 as Wallet, BsXLg as Close,
    };
}

// =============================================================================
// Icon Constants (selected based on theme)
// =============================================================================

macro_rules! themed_icon {
    ($name:ident, $theme_name:ident) => {
        pub const $name: Icon = match crate::config::ICON_THEME {
            IconTheme::Lucide => lucide::$theme_name,
            IconTheme::Bootstrap => bootstrap::$theme_name,
        };
    };
}

themed_icon!(WALLET, Wallet);
themed_icon!(DEMO, Demo);
themed_icon!(USER, User);
themed_icon!(NETWORK, Network);
themed_icon!(LOCK, Lock);
themed_icon!(CLOSE, Close);
themed_icon!(EXTERNAL_LINK, ExternalLink);
themed_icon!(DISCONNECT, Disconnect);
themed_icon!(DEBUG, Debug);
