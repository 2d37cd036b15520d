//! Injected provider flags and the normalized snapshot derived from them.
//!
//! Wallet extensions advertise themselves through boolean flags on the
//! injected EIP-1193 object (`isMetaMask`, `isRabby`, ...). [`detect`] turns
//! one reading of those flags into a [`ProviderSnapshot`].

use serde::{Deserialize, Serialize};

// ============================================================================
// WalletKind
// ============================================================================

/// Wallet implementations recognized by name.
///
/// Variant order is the detection order used for
/// [`ProviderSnapshot::detected`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WalletKind {
    MetaMask,
    CoinbaseWallet,
    Rabby,
    TrustWallet,
}

impl WalletKind {
    /// All known wallets in detection order.
    pub const ALL: [WalletKind; 4] = [
        WalletKind::MetaMask,
        WalletKind::CoinbaseWallet,
        WalletKind::Rabby,
        WalletKind::TrustWallet,
    ];

    /// Human-readable wallet name.
    pub fn display_name(self) -> &'static str {
        match self {
            Self::MetaMask => "MetaMask",
            Self::CoinbaseWallet => "Coinbase Wallet",
            Self::Rabby => "Rabby",
            Self::TrustWallet => "Trust Wallet",
        }
    }

    /// Loose name match used to pair connectors with detected wallets.
    ///
    /// Case and whitespace are ignored, so `"metaMask"`, `"MetaMask"` and
    /// `"meta mask"` all match [`WalletKind::MetaMask`].
    pub fn matches_name(self, name: &str) -> bool {
        let normalize = |s: &str| {
            s.chars()
                .filter(|c| !c.is_whitespace())
                .flat_map(char::to_lowercase)
                .collect::<String>()
        };
        let wanted = normalize(name);
        let own = normalize(self.display_name());
        match self {
            // "Trust" and "Coinbase" are common short forms
            Self::TrustWallet | Self::CoinbaseWallet => {
                wanted == own || (!wanted.is_empty() && own.starts_with(&wanted))
            }
            _ => wanted == own,
        }
    }
}

// ============================================================================
// Raw flags
// ============================================================================

/// Flags of the nested `selectedProvider` sub-handle set by multi-provider
/// injection proxies.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SelectedProviderFlags {
    pub is_coinbase_wallet: bool,
}

/// Capability flags read from the injected provider handle.
///
/// Missing flags read as `false`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderFlags {
    pub is_meta_mask: bool,
    pub is_brave_wallet: bool,
    pub is_coinbase_wallet: bool,
    pub is_rabby: bool,
    pub is_trust: bool,
    pub selected_provider: Option<SelectedProviderFlags>,
}

impl ProviderFlags {
    /// A handle exposing only the MetaMask flag.
    pub fn metamask() -> Self {
        Self {
            is_meta_mask: true,
            ..Self::default()
        }
    }

    /// Brave's built-in wallet, which also claims MetaMask compatibility.
    pub fn brave() -> Self {
        Self {
            is_meta_mask: true,
            is_brave_wallet: true,
            ..Self::default()
        }
    }
}

// ============================================================================
// ProviderSnapshot
// ============================================================================

/// Normalized view of the wallets present at one point in time.
///
/// Snapshots are values: every detection produces a new one.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProviderSnapshot {
    pub is_meta_mask: bool,
    pub is_coinbase_wallet: bool,
    pub is_rabby: bool,
    pub is_trust_wallet: bool,
    /// `true` whenever a handle exists, even if no flag is recognized.
    pub has_any_provider: bool,
    /// Recognized wallets in [`WalletKind::ALL`] order.
    pub detected: Vec<WalletKind>,
}

impl ProviderSnapshot {
    /// Display names of the detected wallets, in detection order.
    pub fn detected_names(&self) -> Vec<&'static str> {
        self.detected.iter().map(|w| w.display_name()).collect()
    }

    /// Whether a specific wallet was detected.
    pub fn has(&self, wallet: WalletKind) -> bool {
        match wallet {
            WalletKind::MetaMask => self.is_meta_mask,
            WalletKind::CoinbaseWallet => self.is_coinbase_wallet,
            WalletKind::Rabby => self.is_rabby,
            WalletKind::TrustWallet => self.is_trust_wallet,
        }
    }

    /// Short summary for logs and the status bar.
    pub fn summary(&self) -> String {
        match (self.has_any_provider, self.detected.is_empty()) {
            (false, _) => "none".to_string(),
            (true, true) => "unknown wallet".to_string(),
            (true, false) => self.detected_names().join(", "),
        }
    }
}

/// Build a snapshot from one reading of the provider handle.
///
/// `None` means no handle is injected and yields the all-false snapshot.
pub fn detect(flags: Option<&ProviderFlags>) -> ProviderSnapshot {
    let Some(flags) = flags else {
        return ProviderSnapshot::default();
    };

    let is_meta_mask = flags.is_meta_mask && !flags.is_brave_wallet;
    let is_coinbase_wallet = flags.is_coinbase_wallet
        || flags
            .selected_provider
            .is_some_and(|p| p.is_coinbase_wallet);
    let is_rabby = flags.is_rabby;
    let is_trust_wallet = flags.is_trust;

    let detected = WalletKind::ALL
        .into_iter()
        .zip([is_meta_mask, is_coinbase_wallet, is_rabby, is_trust_wallet])
        .filter_map(|(kind, present)| present.then_some(kind))
        .collect();

    ProviderSnapshot {
        is_meta_mask,
        is_coinbase_wallet,
        is_rabby,
        is_trust_wallet,
        has_any_provider: true,
        detected,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flags_from_bits(bits: u8) -> ProviderFlags {
        ProviderFlags {
            is_meta_mask: bits & 0b00001 != 0,
            is_brave_wallet: bits & 0b00010 != 0,
            is_coinbase_wallet: bits & 0b00100 != 0,
            is_rabby: bits & 0b01000 != 0,
            is_trust: bits & 0b10000 != 0,
            selected_provider: None,
        }
    }

    #[test]
    fn test_no_handle_is_all_false() {
        let snap = detect(None);
        assert_eq!(snap, ProviderSnapshot::default());
        assert!(!snap.has_any_provider);
        assert!(snap.detected_names().is_empty());
    }

    #[test]
    fn test_unrecognized_handle_still_counts() {
        let snap = detect(Some(&ProviderFlags::default()));
        assert!(snap.has_any_provider);
        assert!(snap.detected.is_empty());
        assert_eq!(snap.summary(), "unknown wallet");
    }

    #[test]
    fn test_brave_is_not_metamask() {
        let snap = detect(Some(&ProviderFlags::brave()));
        assert!(!snap.is_meta_mask);
        assert!(snap.has_any_provider);
        assert!(snap.detected.is_empty());
    }

    #[test]
    fn test_metamask_only() {
        let snap = detect(Some(&ProviderFlags::metamask()));
        assert!(snap.is_meta_mask);
        assert_eq!(snap.detected_names(), vec!["MetaMask"]);
    }

    #[test]
    fn test_coinbase_top_level_or_nested() {
        let top = ProviderFlags {
            is_coinbase_wallet: true,
            ..ProviderFlags::default()
        };
        let nested = ProviderFlags {
            selected_provider: Some(SelectedProviderFlags {
                is_coinbase_wallet: true,
            }),
            ..ProviderFlags::default()
        };
        assert!(detect(Some(&top)).is_coinbase_wallet);
        assert!(detect(Some(&nested)).is_coinbase_wallet);

        let empty_nested = ProviderFlags {
            selected_provider: Some(SelectedProviderFlags::default()),
            ..ProviderFlags::default()
        };
        assert!(!detect(Some(&empty_nested)).is_coinbase_wallet);
    }

    #[test]
    fn test_every_flag_combination() {
        for bits in 0u8..32 {
            let flags = flags_from_bits(bits);
            let snap = detect(Some(&flags));

            assert_eq!(snap.is_meta_mask, flags.is_meta_mask && !flags.is_brave_wallet);
            assert_eq!(snap.is_coinbase_wallet, flags.is_coinbase_wallet);
            assert_eq!(snap.is_rabby, flags.is_rabby);
            assert_eq!(snap.is_trust_wallet, flags.is_trust);
            assert!(snap.has_any_provider);

            // Ordered exactly as WalletKind::ALL, whatever the flags
            let expected: Vec<WalletKind> = WalletKind::ALL
                .into_iter()
                .filter(|w| snap.has(*w))
                .collect();
            assert_eq!(snap.detected, expected);

            // Same flags, same answer
            assert_eq!(detect(Some(&flags)), snap);
        }
    }

    #[test]
    fn test_detected_order_is_fixed() {
        let flags = ProviderFlags {
            is_trust: true,
            is_rabby: true,
            is_coinbase_wallet: true,
            is_meta_mask: true,
            ..ProviderFlags::default()
        };
        assert_eq!(
            detect(Some(&flags)).detected_names(),
            vec!["MetaMask", "Coinbase Wallet", "Rabby", "Trust Wallet"]
        );
    }

    #[test]
    fn test_flags_deserialize_from_camel_case() {
        let json = r#"{"isMetaMask":true,"selectedProvider":{"isCoinbaseWallet":true}}"#;
        let flags: ProviderFlags = serde_json::from_str(json).unwrap();
        assert!(flags.is_meta_mask);
        assert!(!flags.is_rabby);
        assert_eq!(
            flags.selected_provider,
            Some(SelectedProviderFlags {
                is_coinbase_wallet: true
            })
        );
    }

    #[test]
    fn test_matches_name() {
        assert!(WalletKind::MetaMask.matches_name("metaMask"));
        assert!(WalletKind::MetaMask.matches_name("Meta Mask"));
        assert!(WalletKind::CoinbaseWallet.matches_name("Coinbase"));
        assert!(WalletKind::TrustWallet.matches_name("trust"));
        assert!(!WalletKind::Rabby.matches_name("MetaMask"));
        assert!(!WalletKind::TrustWallet.matches_name(""));
    }
}
