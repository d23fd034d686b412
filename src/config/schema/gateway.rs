use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// Gateway port (default: 3000)
    #[serde(default = "default_gateway_port")]
    pub port: u16,
    /// Gateway host (default: 127.0.0.1)
    #[serde(default = "default_gateway_host")]
    pub host: String,
    /// Allow binding to non-localhost addresses (default: false)
    #[serde(default)]
    pub allow_public_bind: bool,
    /// Directory holding the chat widget; relative paths resolve against the
    /// working directory. Skipped when it does not exist.
    #[serde(default = "default_static_dir")]
    pub static_dir: String,
    /// Attach a permissive CORS layer (default: false)
    #[serde(default)]
    pub cors: bool,
}

fn default_gateway_port() -> u16 {
    3000
}

fn default_gateway_host() -> String {
    "127.0.0.1".into()
}

fn default_static_dir() -> String {
    "public".into()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            port: default_gateway_port(),
            host: default_gateway_host(),
            allow_public_bind: false,
            static_dir: default_static_dir(),
            cors: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gateway_config() {
        let config = GatewayConfig::default();

        assert_eq!(config.port, 3000);
        assert_eq!(config.host, "127.0.0.1");
        assert!(!config.allow_public_bind);
        assert_eq!(config.static_dir, "public");
        assert!(!config.cors);
    }

    #[test]
    fn gateway_config_toml_round_trip() {
        let original = GatewayConfig {
            port: 4001,
            host: "0.0.0.0".into(),
            allow_public_bind: true,
            static_dir: "/srv/widget".into(),
            cors: true,
        };

        let toml = toml::to_string(&original).unwrap();
        let decoded: GatewayConfig = toml::from_str(&toml).unwrap();

        assert_eq!(decoded.port, original.port);
        assert_eq!(decoded.host, original.host);
        assert_eq!(decoded.allow_public_bind, original.allow_public_bind);
        assert_eq!(decoded.static_dir, original.static_dir);
        assert_eq!(decoded.cors, original.cors);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let decoded: GatewayConfig = toml::from_str("port = 8080").unwrap();
        assert_eq!(decoded.port, 8080);
        assert_eq!(decoded.host, "127.0.0.1");
        assert_eq!(decoded.static_dir, "public");
    }
}
