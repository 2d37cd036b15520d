//! EIP-1193 interop using web-sys.
//!
//! Talks to the provider injected at `window.ethereum` through the Reflect
//! API: capability flags, account and chain requests, event subscriptions,
//! and the localStorage session flag.

use js_sys::{Array, Function, Object, Promise, Reflect};
use wasm_bindgen::JsCast;
use wasm_bindgen::JsValue;
use wasm_bindgen::prelude::Closure;
use wasm_bindgen_futures::JsFuture;
use walletgate_core::{ProviderFlags, SelectedProviderFlags, WalletKind};

use crate::config::wallet::{SESSION_KEY, TIMEOUT_MS};
use crate::core::error::WalletError;
use crate::utils::{RaceResult, dom, race_with_timeout};

// ============================================================================
// Provider Access
// ============================================================================

/// Get the `window.ethereum` object injected by the wallet extension.
pub fn get_ethereum() -> Result<Object, WalletError> {
    let window = dom::window().ok_or(WalletError::NoWindow)?;
    Reflect::get(&window, &"ethereum".into())
        .ok()
        .and_then(|v| v.dyn_into::<Object>().ok())
        .ok_or(WalletError::NotInstalled)
}

/// Check if any injected wallet is present.
pub fn is_available() -> bool {
    get_ethereum().is_ok()
}

/// Truthiness of a property, the way `!!obj.flag` reads it.
fn flag(target: &JsValue, name: &str) -> bool {
    Reflect::get(target, &name.into())
        .map(|v| v.is_truthy())
        .unwrap_or(false)
}

/// Read the capability flags of a provider object.
pub fn read_flags(provider: &JsValue) -> ProviderFlags {
    let selected_provider = Reflect::get(provider, &"selectedProvider".into())
        .ok()
        .filter(|v| v.is_object())
        .map(|sub| SelectedProviderFlags {
            is_coinbase_wallet: flag(&sub, "isCoinbaseWallet"),
        });

    ProviderFlags {
        is_meta_mask: flag(provider, "isMetaMask"),
        is_brave_wallet: flag(provider, "isBraveWallet"),
        is_coinbase_wallet: flag(provider, "isCoinbaseWallet"),
        is_rabby: flag(provider, "isRabby"),
        is_trust: flag(provider, "isTrust"),
        selected_provider,
    }
}

/// Whether a single provider object belongs to `kind`.
fn is_kind(provider: &JsValue, kind: WalletKind) -> bool {
    let flags = read_flags(provider);
    match kind {
        WalletKind::MetaMask => flags.is_meta_mask && !flags.is_brave_wallet,
        WalletKind::CoinbaseWallet => flags.is_coinbase_wallet,
        WalletKind::Rabby => flags.is_rabby,
        WalletKind::TrustWallet => flags.is_trust,
    }
}

/// Pick the provider object to talk to for a connector.
///
/// When several extensions share `window.ethereum` they list themselves in
/// `ethereum.providers`; a brand connector uses its own entry from that list.
/// Otherwise every connector goes through `window.ethereum` itself.
pub fn provider_for(kind: Option<WalletKind>) -> Result<Object, WalletError> {
    let ethereum = get_ethereum()?;
    let Some(kind) = kind else {
        return Ok(ethereum);
    };

    let providers = Reflect::get(&ethereum, &"providers".into())
        .ok()
        .filter(Array::is_array)
        .map(|v| Array::from(&v));

    let matching = providers.and_then(|list| {
        list.iter()
            .find(|p| is_kind(p, kind))
            .and_then(|p| p.dyn_into::<Object>().ok())
    });

    Ok(matching.unwrap_or(ethereum))
}

// ============================================================================
// Requests
// ============================================================================

/// Extract `{ code, message }` from a rejected EIP-1193 request.
fn rejection(err: JsValue) -> WalletError {
    let code = Reflect::get(&err, &"code".into())
        .ok()
        .and_then(|c| c.as_f64())
        .map(|c| c as i64);
    let message = Reflect::get(&err, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
        .or_else(|| err.as_string())
        .unwrap_or_else(|| format!("{:?}", err));
    WalletError::RequestRejected { code, message }
}

/// Build and dispatch `provider.request({ method, params })`.
fn dispatch(provider: &Object, method: &str, params: Option<&JsValue>) -> Result<Promise, WalletError> {
    let args = Object::new();
    Reflect::set(&args, &"method".into(), &method.into())
        .map_err(|_| WalletError::RequestCreationFailed)?;
    if let Some(params) = params {
        Reflect::set(&args, &"params".into(), params)
            .map_err(|_| WalletError::RequestCreationFailed)?;
    }

    let request = Reflect::get(provider, &"request".into())
        .map_err(|_| WalletError::RequestCreationFailed)?
        .dyn_into::<Function>()
        .map_err(|_| WalletError::RequestCreationFailed)?;

    request
        .call1(provider, &args)
        .map_err(rejection)?
        .dyn_into::<Promise>()
        .map_err(|_| WalletError::RequestCreationFailed)
}

/// Helper to await `provider.request({ method: ... })`.
async fn request(provider: &Object, method: &str) -> Result<JsValue, WalletError> {
    let promise = dispatch(provider, method, None)?;
    JsFuture::from(promise).await.map_err(rejection)
}

/// Parse a hex chain id such as `"0x1"`.
pub fn parse_chain_id(hex: &str) -> Option<u64> {
    let digits = hex.strip_prefix("0x").or_else(|| hex.strip_prefix("0X"))?;
    u64::from_str_radix(digits, 16).ok()
}

/// Get current chain ID
pub async fn get_chain_id(provider: &Object) -> Option<u64> {
    let result = request(provider, "eth_chainId").await.ok()?;
    parse_chain_id(&result.as_string()?)
}

/// Convert chain ID to network name
pub fn chain_name(chain_id: u64) -> &'static str {
    match chain_id {
        1 => "Ethereum",
        11155111 => "Sepolia",
        17000 => "Holesky",
        42161 => "Arbitrum",
        10 => "Optimism",
        8453 => "Base",
        137 => "Polygon",
        56 => "BNB Chain",
        43114 => "Avalanche",
        324 => "zkSync Era",
        59144 => "Linea",
        534352 => "Scroll",
        _ => "Unknown",
    }
}

/// Block explorer page for an address, for chains with a known explorer.
pub fn explorer_url(chain_id: u64, address: &str) -> Option<String> {
    let base = match chain_id {
        1 => "https://etherscan.io",
        11155111 => "https://sepolia.etherscan.io",
        42161 => "https://arbiscan.io",
        10 => "https://optimistic.etherscan.io",
        8453 => "https://basescan.org",
        137 => "https://polygonscan.com",
        _ => return None,
    };
    Some(format!("{}/address/{}", base, address))
}

/// Request wallet connection (shows the wallet popup)
pub async fn connect(provider: &Object) -> Result<String, WalletError> {
    let result = request(provider, "eth_requestAccounts").await?;
    let accounts = Array::from(&result);

    accounts.get(0).as_string().ok_or(WalletError::NoAccount)
}

/// Get currently connected account (no popup) with timeout
pub async fn get_account(provider: &Object) -> Result<Option<String>, WalletError> {
    let promise = dispatch(provider, "eth_accounts", None)?;

    match race_with_timeout(promise, TIMEOUT_MS).await {
        RaceResult::Completed(result) => Ok(Array::from(&result).get(0).as_string()),
        RaceResult::TimedOut => Err(WalletError::Timeout),
        RaceResult::Error(message) => Err(WalletError::RequestRejected {
            code: None,
            message,
        }),
    }
}

/// Drop the site's account permission where the wallet supports it.
///
/// EIP-1193 has no disconnect call; `wallet_revokePermissions` (EIP-2255)
/// is the closest thing and is not implemented by every wallet.
pub async fn revoke_permissions(provider: &Object) -> Result<(), WalletError> {
    let permission = Object::new();
    Reflect::set(&permission, &"eth_accounts".into(), &Object::new())
        .map_err(|_| WalletError::RequestCreationFailed)?;
    let params: JsValue = Array::of1(&permission).into();

    let promise = dispatch(provider, "wallet_revokePermissions", Some(&params))?;
    JsFuture::from(promise).await.map(|_| ()).map_err(rejection)
}

// ============================================================================
// Session Persistence
// ============================================================================

/// Check if user has previously connected (localStorage flag).
pub fn has_session() -> bool {
    dom::local_storage()
        .and_then(|s| s.get_item(SESSION_KEY).ok().flatten())
        .is_some()
}

/// Save connection session to localStorage.
pub fn save_session() {
    if let Some(storage) = dom::local_storage() {
        let _ = storage.set_item(SESSION_KEY, "1");
    }
}

/// Clear connection session from localStorage.
pub fn clear_session() {
    if let Some(storage) = dom::local_storage() {
        let _ = storage.remove_item(SESSION_KEY);
    }
}

// ============================================================================
// Event Listeners
// ============================================================================

/// Call `provider.on(event, closure)`.
fn subscribe(provider: &Object, event: &str, closure: &Closure<dyn Fn(JsValue)>) -> Result<(), WalletError> {
    let on_fn = Reflect::get(provider, &"on".into())
        .map_err(|_| WalletError::RequestCreationFailed)?
        .dyn_into::<Function>()
        .map_err(|_| WalletError::RequestCreationFailed)?;

    on_fn
        .call2(provider, &event.into(), closure.as_ref())
        .map_err(|_| WalletError::RequestCreationFailed)?;
    Ok(())
}

/// Register a callback for when the connected account changes.
///
/// The callback receives `Some(address)` when an account is connected,
/// or `None` when disconnected.
///
/// # Note
/// The closure is intentionally leaked using `forget()` since the provider
/// keeps the listener for the entire lifetime of the page.
pub fn on_accounts_changed(callback: impl Fn(Option<String>) + 'static) -> Result<(), WalletError> {
    let ethereum = get_ethereum()?;

    let closure = Closure::wrap(Box::new(move |accounts: JsValue| {
        let account = Array::from(&accounts).get(0).as_string();
        callback(account);
    }) as Box<dyn Fn(JsValue)>);

    subscribe(&ethereum, "accountsChanged", &closure)?;
    closure.forget();
    Ok(())
}

/// Register a callback for when the connected chain changes.
///
/// The callback receives the parsed chain ID, or `None` if the wallet sent
/// something that is not a hex chain ID.
///
/// # Note
/// The closure is intentionally leaked, as for [`on_accounts_changed`].
pub fn on_chain_changed(callback: impl Fn(Option<u64>) + 'static) -> Result<(), WalletError> {
    let ethereum = get_ethereum()?;

    let closure = Closure::wrap(Box::new(move |chain_id: JsValue| {
        callback(chain_id.as_string().as_deref().and_then(parse_chain_id));
    }) as Box<dyn Fn(JsValue)>);

    subscribe(&ethereum, "chainChanged", &closure)?;
    closure.forget();
    Ok(())
}
