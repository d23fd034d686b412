use strum::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
#[strum(serialize_all = "snake_case")]
pub enum Intent {
    CheapCoins,
    RisingCoins,
    TopHoldings,
    MarketSummary,
    Fallback,
}

/// Evaluated top to bottom; the first intent with a matching keyword wins.
pub const INTENT_TABLE: &[(Intent, &[&str])] = &[
    (Intent::CheapCoins, &["barat", "baixo", "preço baixo"]),
    (Intent::RisingCoins, &["subind", "alta", "potencial", "comprar"]),
    (
        Intent::TopHoldings,
        &["essencial", "segur", "manter", "top 10", "topo"],
    ),
    (Intent::MarketSummary, &["resumo", "como está", "hoje"]),
];

pub fn classify(question: &str) -> Intent {
    let lowered = question.to_lowercase();
    INTENT_TABLE
        .iter()
        .find(|(_, keywords)| keywords.iter().any(|kw| lowered.contains(*kw)))
        .map_or(Intent::Fallback, |(intent, _)| *intent)
}
