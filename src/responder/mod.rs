//! Canned market answers for when no completion provider is used.

pub mod intent;

pub use intent::{Intent, classify};

use crate::market::MarketSnapshot;
use crate::market::types::{CoinRecord, finite_or_zero};
use crate::session::{Role, Turn};

pub const RISK_DISCLAIMER: &str =
    "\n\nLembre-se: o mercado é volátil e todo investimento envolve risco.";

const MAX_CHEAP: usize = 5;
const MAX_RISING: usize = 5;
const MAX_TOP: usize = 3;
const SUMMARY_RISING: usize = 3;

const USAGE_HINT: &str = "Posso ajudar com análises: pergunte por 'quais estão baratas?', \
     'quais estão subindo?' ou peça um resumo.";
const NO_CHEAP_COINS: &str = "No momento não encontrei moedas relevantes com preço abaixo \
     de US$1 (filtrando stablecoins).";

/// Answer `question` from the snapshot. Always ends with [`RISK_DISCLAIMER`].
pub fn respond(snapshot: &MarketSnapshot, question: &str, history: &[Turn]) -> String {
    let intent = classify(question);
    tracing::debug!(%intent, "rule-based intent");

    let mut reply = match intent {
        Intent::CheapCoins => cheap_coins(snapshot),
        Intent::RisingCoins => rising_coins(snapshot),
        Intent::TopHoldings => top_holdings(snapshot),
        Intent::MarketSummary => market_summary(snapshot),
        Intent::Fallback => fallback(history),
    };
    reply.push_str(RISK_DISCLAIMER);
    reply
}

fn cheap_coins(snapshot: &MarketSnapshot) -> String {
    let cheap = first(&snapshot.cheap, MAX_CHEAP);
    let mut reply = if cheap.is_empty() {
        NO_CHEAP_COINS.to_string()
    } else {
        let lines: Vec<String> = cheap
            .iter()
            .map(|coin| format!("- {}: ${}", coin.name, finite_or_zero(coin.price)))
            .collect();
        format!(
            "💰 Moedas com preço baixo (top {}):\n{}",
            cheap.len(),
            lines.join("\n")
        )
    };
    reply.push_str("\n\nDica: moedas baratas podem ter alta volatilidade.");
    reply
}

fn rising_coins(snapshot: &MarketSnapshot) -> String {
    let rising = first(&snapshot.rising, MAX_RISING);
    let mut reply = if rising.is_empty() {
        "Não há muitas moedas em alta significativa entre as top analisadas neste momento."
            .to_string()
    } else {
        let lines: Vec<String> = rising
            .iter()
            .map(|coin| format!("- {}: {:.2}%", coin.name, finite_or_zero(coin.change)))
            .collect();
        format!("📈 Top moedas em valorização (24h):\n{}", lines.join("\n"))
    };
    reply.push_str("\n\nAnalise volume e notícias antes de tomar decisão.");
    reply
}

fn top_holdings(snapshot: &MarketSnapshot) -> String {
    let essentials = names(first(&snapshot.top, MAX_TOP));
    let mut reply = if essentials.is_empty() {
        "Sem dados de top no momento.".to_string()
    } else {
        format!("🔒 Moedas essenciais para longo prazo: {essentials}.")
    };
    reply.push_str("\n\nEsses ativos costumam ter maior liquidez e adoção.");
    reply
}

fn market_summary(snapshot: &MarketSnapshot) -> String {
    if snapshot.is_empty() {
        return "Sem dados de mercado no momento.".to_string();
    }

    let top = names(first(&snapshot.top, MAX_TOP));
    let rising = or_none_relevant(names(first(&snapshot.rising, SUMMARY_RISING)));
    let cheap = or_none_relevant(names(first(&snapshot.cheap, MAX_CHEAP)));
    format!(
        "Resumo rápido: top do mercado — {top}. Moedas em alta: {rising}. Moedas baratas: {cheap}."
    )
}

fn fallback(history: &[Turn]) -> String {
    history
        .iter()
        .rev()
        .find(|turn| turn.role == Role::User)
        .map_or_else(
            || USAGE_HINT.to_string(),
            |turn| {
                format!(
                    "Você perguntou antes: \"{}\". Posso continuar com base nisso \
                     ou respondo algo novo?",
                    turn.text
                )
            },
        )
}

fn first(coins: &[CoinRecord], n: usize) -> &[CoinRecord] {
    &coins[..coins.len().min(n)]
}

fn names(coins: &[CoinRecord]) -> String {
    coins
        .iter()
        .map(|coin| coin.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

fn or_none_relevant(list: String) -> String {
    if list.is_empty() {
        "nenhuma relevante".to_string()
    } else {
        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot_with(
        top: Vec<CoinRecord>,
        cheap: Vec<CoinRecord>,
        rising: Vec<CoinRecord>,
    ) -> MarketSnapshot {
        MarketSnapshot { top, cheap, rising }
    }

    fn turn(role: Role, text: &str) -> Turn {
        Turn {
            role,
            text: text.to_string(),
            timestamp: "2026-01-01T00:00:00+00:00".to_string(),
        }
    }

    #[test]
    fn cheap_scenario_lists_coin_price() {
        let snapshot = snapshot_with(vec![], vec![CoinRecord::new("ABC").with_price(0.5)], vec![]);
        let reply = respond(&snapshot, "quais moedas estão baratas?", &[]);
        assert!(reply.starts_with("💰 Moedas com preço baixo (top 1):\n- ABC: $0.5"));
        assert!(reply.contains("Dica: moedas baratas podem ter alta volatilidade."));
        assert!(reply.ends_with(RISK_DISCLAIMER));
    }

    #[test]
    fn empty_cheap_list_says_no_data() {
        let reply = respond(&MarketSnapshot::default(), "algo barato?", &[]);
        assert!(reply.starts_with(NO_CHEAP_COINS));
        assert!(reply.contains("abaixo de US$1 (filtrando stablecoins)."));
        assert!(reply.ends_with(RISK_DISCLAIMER));
    }

    #[test]
    fn cheap_list_is_capped_at_five() {
        let cheap = (0..8)
            .map(|i| CoinRecord::new(format!("C{i}")).with_price(0.1))
            .collect();
        let reply = respond(&snapshot_with(vec![], cheap, vec![]), "baratas", &[]);
        assert!(reply.starts_with("💰 Moedas com preço baixo (top 5):"));
        assert!(reply.contains("- C4: $0.1"));
        assert!(!reply.contains("C5"));
    }

    #[test]
    fn missing_or_nan_numbers_render_as_zero() {
        let rising = vec![
            CoinRecord::new("XYZ"),
            CoinRecord::new("NaNCoin").with_change(f64::NAN),
        ];
        let reply = respond(&snapshot_with(vec![], vec![], rising), "o que está subindo?", &[]);
        assert!(reply.contains("- XYZ: 0.00%"));
        assert!(reply.contains("- NaNCoin: 0.00%"));
        assert!(!reply.contains("NaN%"));

        let cheap = vec![CoinRecord::new("Nada")];
        let reply = respond(&snapshot_with(vec![], cheap, vec![]), "baixo", &[]);
        assert!(reply.contains("- Nada: $0"));
    }

    #[test]
    fn rising_uses_two_decimals() {
        let rising = vec![CoinRecord::new("Solana").with_change(12.345_6)];
        let reply = respond(&snapshot_with(vec![], vec![], rising), "potencial", &[]);
        assert!(reply.starts_with("📈 Top moedas em valorização (24h):\n- Solana: 12.35%"));
        assert!(reply.contains("Analise volume e notícias antes de tomar decisão."));
    }

    #[test]
    fn top_holdings_names_first_three() {
        let top = ["Bitcoin", "Ethereum", "BNB", "Solana"]
            .into_iter()
            .map(CoinRecord::new)
            .collect();
        let reply = respond(&snapshot_with(top, vec![], vec![]), "o que é essencial?", &[]);
        assert!(reply.starts_with("🔒 Moedas essenciais para longo prazo: Bitcoin, Ethereum, BNB."));
        assert!(reply.contains("Esses ativos costumam ter maior liquidez e adoção."));
    }

    #[test]
    fn top_holdings_without_data() {
        let reply = respond(&MarketSnapshot::default(), "top 10", &[]);
        assert!(reply.starts_with("Sem dados de top no momento."));
    }

    #[test]
    fn summary_fills_missing_lists() {
        let top = vec![CoinRecord::new("Bitcoin"), CoinRecord::new("Ethereum")];
        let reply = respond(&snapshot_with(top, vec![], vec![]), "resumo", &[]);
        assert_eq!(
            reply,
            format!(
                "Resumo rápido: top do mercado — Bitcoin, Ethereum. \
                 Moedas em alta: nenhuma relevante. \
                 Moedas baratas: nenhuma relevante.{RISK_DISCLAIMER}"
            )
        );
    }

    #[test]
    fn summary_without_any_data() {
        let reply = respond(&MarketSnapshot::default(), "como está hoje?", &[]);
        assert_eq!(reply, format!("Sem dados de mercado no momento.{RISK_DISCLAIMER}"));
    }

    #[test]
    fn fallback_recalls_last_user_turn() {
        let history = vec![
            turn(Role::User, "primeira"),
            turn(Role::Assistant, "ok"),
            turn(Role::User, "segunda"),
            turn(Role::Assistant, "ok"),
        ];
        let reply = respond(&MarketSnapshot::default(), "e agora?", &history);
        assert!(reply.starts_with(
            "Você perguntou antes: \"segunda\". \
             Posso continuar com base nisso ou respondo algo novo?"
        ));
    }

    #[test]
    fn fallback_without_user_turns_gives_usage_hint() {
        let history = vec![turn(Role::Assistant, "oi")];
        let reply = respond(&MarketSnapshot::default(), "olá", &history);
        assert_eq!(reply, format!("{USAGE_HINT}{RISK_DISCLAIMER}"));
        let reply = respond(&MarketSnapshot::default(), "olá", &[]);
        assert_eq!(reply, format!("{USAGE_HINT}{RISK_DISCLAIMER}"));
    }
}
