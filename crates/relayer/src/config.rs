//! Relayer configuration

pub mod error;

use core::fmt::{Debug, Display, Error as FmtError, Formatter};
use core::time::Duration;
use std::{fs, fs::File, io::Write, path::Path};

use serde_derive::{Deserialize, Serialize};

use nft_relayer_types::core::host::identifier::{
    ChainId, ChannelId, ChannelIdentity, ConnectionId,
};

pub use error::Error;

/// Defaults for various fields
pub mod default {
    use super::*;

    pub fn poll_interval() -> Duration {
        Duration::from_millis(100)
    }

    pub fn rpc_timeout() -> Duration {
        Duration::from_secs(10)
    }

    pub fn request_timeout() -> Duration {
        Duration::from_secs(10)
    }

    pub fn store_prefix() -> String {
        "ibc".to_string()
    }

    pub fn hub_namespace() -> String {
        "hh".to_string()
    }

    pub fn account_number() -> u64 {
        0
    }
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub global: GlobalConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    pub source: ChainConfig,
    pub destination: ChainConfig,
    pub hub: HubConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            relay: RelayConfig::default(),
            source: ChainConfig::local("source", 26657),
            destination: ChainConfig::local("destination", 26659),
            hub: HubConfig::default(),
        }
    }
}

impl Config {
    /// The channel to relay, as set in the configuration.
    pub fn channel(&self) -> Result<ChannelIdentity, Error> {
        self.relay.channel()
    }

    /// Checks the semantic consistency of the configuration.
    ///
    /// Parsing only guarantees that the fields are well-formed; this rejects
    /// combinations the relayer cannot run with. The channel is not checked
    /// here since it may be given on the command line instead.
    pub fn validate(&self) -> Result<(), Error> {
        if self.source.id == self.destination.id {
            return Err(Error::same_chain(self.source.id.clone()));
        }

        if self.relay.poll_interval.is_zero() {
            return Err(Error::zero_duration("relay.poll_interval".to_string()));
        }

        for (name, chain) in [("source", &self.source), ("destination", &self.destination)] {
            if chain.rpc_timeout.is_zero() {
                return Err(Error::zero_duration(format!("{name}.rpc_timeout")));
            }
            if chain.store_prefix.is_empty() {
                return Err(Error::empty_field(format!("{name}.store_prefix")));
            }
        }

        self.hub.validate()
    }
}

/// Log levels are wrappers over [`tracing_core::Level`].
///
/// [`tracing_core::Level`]: https://docs.rs/tracing-core/0.1.17/tracing_core/struct.Level.html
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Trace,
    Debug,
    #[default]
    Info,
    Warn,
    Error,
}

impl Display for LogLevel {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        match self {
            LogLevel::Trace => write!(f, "trace"),
            LogLevel::Debug => write!(f, "debug"),
            LogLevel::Info => write!(f, "info"),
            LogLevel::Warn => write!(f, "warn"),
            LogLevel::Error => write!(f, "error"),
        }
    }
}

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    pub log_level: LogLevel,
}

/// The channel to relay and how often to look at it.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    pub connection_id: Option<ConnectionId>,
    pub channel_id: Option<ChannelId>,
    #[serde(default = "default::poll_interval", with = "humantime_serde")]
    pub poll_interval: Duration,
}

impl RelayConfig {
    pub fn channel(&self) -> Result<ChannelIdentity, Error> {
        let connection_id = self
            .connection_id
            .clone()
            .ok_or_else(|| Error::missing_channel_identity("connection_id".to_string()))?;

        let channel_id = self
            .channel_id
            .clone()
            .ok_or_else(|| Error::missing_channel_identity("channel_id".to_string()))?;

        Ok(ChannelIdentity::new(connection_id, channel_id))
    }
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            connection_id: None,
            channel_id: None,
            poll_interval: default::poll_interval(),
        }
    }
}

/// A chain node the relayer reads proven state from.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ChainConfig {
    pub id: ChainId,
    pub rpc_addr: tendermint_rpc::Url,
    #[serde(default = "default::rpc_timeout", with = "humantime_serde")]
    pub rpc_timeout: Duration,
    #[serde(default = "default::store_prefix")]
    pub store_prefix: String,
}

impl ChainConfig {
    fn local(id: &str, port: u16) -> Self {
        let rpc_addr = format!("http://127.0.0.1:{port}")
            .parse()
            .expect("a loopback URL is always valid");

        Self {
            id: ChainId::from_string(id),
            rpc_addr,
            rpc_timeout: default::rpc_timeout(),
            store_prefix: default::store_prefix(),
        }
    }
}

/// The hub's REST server and the account submitting on it.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct HubConfig {
    /// Base URL of the hub's REST server, e.g. `http://localhost:1317`.
    pub rest_addr: String,
    /// Route namespace of the marketplace module, e.g. `hh` for `/hh/nft/sell`.
    #[serde(default = "default::hub_namespace")]
    pub namespace: String,
    pub chain_id: String,
    /// Used when the account endpoint does not report an account number.
    #[serde(default = "default::account_number")]
    pub account_number: u64,
    #[serde(default = "default::request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,
    pub signer: SignerConfig,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            rest_addr: String::new(),
            namespace: default::hub_namespace(),
            chain_id: String::new(),
            account_number: default::account_number(),
            request_timeout: default::request_timeout(),
            signer: SignerConfig::default(),
        }
    }
}

impl HubConfig {
    fn validate(&self) -> Result<(), Error> {
        let url = reqwest::Url::parse(&self.rest_addr)
            .map_err(|e| Error::invalid_hub_address(self.rest_addr.clone(), e.to_string()))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::invalid_hub_address(
                self.rest_addr.clone(),
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if self.request_timeout.is_zero() {
            return Err(Error::zero_duration("hub.request_timeout".to_string()));
        }

        for (field, value) in [
            ("hub.namespace", &self.namespace),
            ("hub.chain_id", &self.chain_id),
            ("hub.signer.name", &self.signer.name),
            ("hub.signer.password", &self.signer.password),
            ("hub.signer.address", &self.signer.address),
        ] {
            if value.is_empty() {
                return Err(Error::empty_field(field.to_string()));
            }
        }

        Ok(())
    }
}

/// Credentials of the hub account that submits the sell orders.
#[derive(Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SignerConfig {
    /// Key name of the account in the hub's keybase.
    pub name: String,
    pub password: String,
    /// Bech32 address of the account; also the owner of listed items.
    pub address: String,
}

impl Debug for SignerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), FmtError> {
        f.debug_struct("SignerConfig")
            .field("name", &self.name)
            .field("password", &"<redacted>")
            .field("address", &self.address)
            .finish()
    }
}

/// Attempt to load and parse the TOML config file as a `Config`.
pub fn load(path: impl AsRef<Path>) -> Result<Config, Error> {
    let config_toml = std::fs::read_to_string(&path).map_err(Error::io)?;

    let config = toml::from_str::<Config>(&config_toml[..]).map_err(Error::decode)?;

    Ok(config)
}

/// Serialize the given `Config` as TOML to the given config file.
pub fn store(config: &Config, path: impl AsRef<Path>) -> Result<(), Error> {
    let mut file = if path.as_ref().exists() {
        fs::OpenOptions::new().write(true).truncate(true).open(path)
    } else {
        File::create(path)
    }
    .map_err(Error::io)?;

    store_writer(config, &mut file)
}

/// Serialize the given `Config` as TOML to the given writer.
pub(crate) fn store_writer(config: &Config, mut writer: impl Write) -> Result<(), Error> {
    let toml_config = toml::to_string_pretty(&config).map_err(Error::encode)?;

    writeln!(writer, "{toml_config}").map_err(Error::io)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{load, store_writer, Config, LogLevel};
    use crate::config::error::ErrorDetail;
    use core::time::Duration;
    use test_log::test;

    fn example_path() -> &'static str {
        concat!(
            env!("CARGO_MANIFEST_DIR"),
            "/tests/config/fixtures/relayer_conf_example.toml"
        )
    }

    #[test]
    fn parse_valid_config() {
        let config = load(example_path()).expect("could not parse config");

        assert_eq!(config.global.log_level, LogLevel::Info);
        assert_eq!(config.source.id.as_str(), "zonea");
        assert_eq!(config.destination.id.as_str(), "zoneb");
        assert_eq!(config.relay.poll_interval, Duration::from_millis(500));
        assert_eq!(config.hub.namespace, "hh");
        assert_eq!(config.hub.signer.name, "jack");

        let channel = config.channel().unwrap();
        assert_eq!(channel.connection_id.as_str(), "connectionzoneab");
        assert_eq!(channel.channel_id.as_str(), "channelzoneab");

        config.validate().expect("example config is valid");
    }

    #[test]
    fn defaults_are_filled_in() {
        let config = load(example_path()).unwrap();

        assert_eq!(config.source.rpc_timeout, Duration::from_secs(10));
        assert_eq!(config.source.store_prefix, "ibc");
        assert_eq!(config.hub.account_number, 0);
        assert_eq!(config.hub.request_timeout, Duration::from_secs(10));
    }

    #[test]
    fn serialize_valid_config() {
        let config = load(example_path()).expect("could not parse config");
        let mut buffer = Vec::new();

        let result = store_writer(&config, &mut buffer);
        assert!(result.is_ok());

        let reparsed: Config = toml::from_str(&String::from_utf8(buffer).unwrap()).unwrap();
        assert_eq!(reparsed.hub.rest_addr, config.hub.rest_addr);
    }

    #[test]
    fn default_config_is_not_runnable() {
        // No hub, no signer and no channel: nothing is compiled in.
        let config = Config::default();

        let err = config.validate().unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::InvalidHubAddress(_)));

        let err = config.channel().unwrap_err();
        assert!(matches!(
            err.detail(),
            ErrorDetail::MissingChannelIdentity(_)
        ));
    }

    #[test]
    fn reject_same_source_and_destination() {
        let mut config = load(example_path()).unwrap();
        config.destination.id = config.source.id.clone();

        let err = config.validate().unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::SameChain(_)));
    }

    #[test]
    fn reject_empty_password() {
        let mut config = load(example_path()).unwrap();
        config.hub.signer.password.clear();

        let err = config.validate().unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::EmptyField(e) if e.field == "hub.signer.password"));
    }

    #[test]
    fn reject_bad_hub_address() {
        let mut config = load(example_path()).unwrap();
        config.hub.rest_addr = "localhost:1317".to_string();

        assert!(config.validate().is_err());
    }

    #[test]
    fn reject_zero_poll_interval() {
        let mut config = load(example_path()).unwrap();
        config.relay.poll_interval = Duration::ZERO;

        let err = config.validate().unwrap_err();
        assert!(matches!(err.detail(), ErrorDetail::ZeroDuration(_)));
    }

    #[test]
    fn password_is_redacted_in_debug_output() {
        let config = load(example_path()).unwrap();
        let dbg = format!("{:?}", config.hub.signer);

        assert!(dbg.contains("<redacted>"));
        assert!(!dbg.contains("12345678"));
    }
}
