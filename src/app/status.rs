use crate::config::{Config, MemoryBackend};

pub fn render_status(config: &Config) -> String {
    let mut lines = vec![
        "◆ CryptoBrain status".to_string(),
        String::new(),
        format!("Version     {}", env!("CARGO_PKG_VERSION")),
        format!("Workspace   {}", config.workspace_dir.display()),
        format!("Config      {}", config.config_path.display()),
        String::new(),
        format!("  Provider      {}", config.provider_name()),
        format!("  Model         {}", config.model()),
        format!("  Temperature   {:.2}", config.default_temperature),
        format!(
            "  API key       {}",
            if crate::providers::resolve_api_key(config.provider_name(), config.api_key.as_deref())
                .is_some()
            {
                "set"
            } else {
                "missing"
            }
        ),
        format!("  Responder     {}", config.responder.mode),
        String::new(),
        format!("  Memory        {}", config.memory.backend),
    ];

    if config.memory.backend == MemoryBackend::File {
        lines.push(format!("    path        {}", config.memory_path().display()));
    }
    lines.push(format!(
        "    max_turns={}, history_window={}",
        config.memory.max_turns, config.memory.history_window
    ));
    lines.push(String::new());
    lines.push(format!(
        "  Gateway       {}:{}{}",
        config.gateway.host,
        config.gateway.port,
        if config.gateway.cors { " (cors)" } else { "" }
    ));
    lines.push(format!("    static      {}", config.static_dir().display()));
    lines.push(format!("  Market        {}", config.market.base_url));

    lines.join("\n")
}
