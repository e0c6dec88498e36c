//! Provider ranking
//!
//! Keeps each provider's best offer and orders providers by best rate.
//! Pure selection: input offers are cloned, never mutated.

use crate::models::RateOffer;
use std::collections::HashMap;

/// Deduplicate offers per provider (lower-cased, trimmed name), keep the
/// offer with the highest `rate_max` in each group, sort descending by
/// `rate_max` (absent rates sort last, as −1), and truncate to `top_n`
/// (coerced up to 1). The sort is stable, so ties keep input order.
pub fn best_per_provider(offers: &[RateOffer], top_n: usize) -> Vec<RateOffer> {
    let mut best: HashMap<String, &RateOffer> = HashMap::new();
    let mut order: Vec<String> = Vec::new();

    for offer in offers {
        let key = offer.provider.trim().to_lowercase();
        let replace = match best.get(&key) {
            // Strict improvement only, so the earliest offer wins ties
            Some(existing) => offer.score() > existing.score(),
            None => {
                order.push(key.clone());
                true
            }
        };
        if replace {
            best.insert(key, offer);
        }
    }

    let mut ranked: Vec<RateOffer> = order
        .iter()
        .filter_map(|key| best.get(key).copied().cloned())
        .collect();
    ranked.sort_by(|a, b| b.score().partial_cmp(&a.score()).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(top_n.max(1));
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;

    fn offer(provider: &str, rate_max: Option<f64>) -> RateOffer {
        RateOffer {
            provider: provider.to_string(),
            tenure: "1 year".to_string(),
            interest_rate: rate_max
                .map(|r| format!("{}%", r))
                .unwrap_or_else(|| "n/a".to_string()),
            amount: String::new(),
            senior_citizen: false,
            source_name: "Test".to_string(),
            source_url: "https://example.com".to_string(),
            rate_min: rate_max,
            rate_max,
        }
    }

    #[test]
    fn test_best_offer_per_provider_then_descending() {
        let offers = vec![
            offer("ProviderA", Some(7.1)),
            offer("ProviderA", Some(7.4)),
            offer("ProviderB", None),
        ];

        let ranked = best_per_provider(&offers, 2);
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].provider, "ProviderA");
        assert_eq!(ranked[0].rate_max, Some(7.4));
        assert_eq!(ranked[1].provider, "ProviderB");
        assert_eq!(ranked[1].rate_max, None);
    }

    #[test]
    fn test_provider_key_is_case_and_space_insensitive() {
        let offers = vec![
            offer("Alpha Bank", Some(6.0)),
            offer("  alpha bank ", Some(7.0)),
        ];
        let ranked = best_per_provider(&offers, 10);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].rate_max, Some(7.0));
    }

    #[test]
    fn test_rateless_offer_only_wins_alone() {
        let offers = vec![offer("Alpha", None), offer("Alpha", Some(0.5))];
        let ranked = best_per_provider(&offers, 10);
        assert_eq!(ranked[0].rate_max, Some(0.5));

        let ranked = best_per_provider(&[offer("Beta", None)], 10);
        assert_eq!(ranked[0].rate_max, None);
    }

    #[test]
    fn test_top_n_coerced_to_at_least_one() {
        let offers = vec![offer("A", Some(7.0)), offer("B", Some(6.0))];
        let ranked = best_per_provider(&offers, 0);
        assert_eq!(ranked.len(), 1);
        assert_eq!(ranked[0].provider, "A");
    }

    #[test]
    fn test_ties_keep_input_order() {
        let offers = vec![
            offer("First", Some(7.0)),
            offer("Second", Some(7.0)),
            offer("Third", Some(7.0)),
        ];
        let ranked = best_per_provider(&offers, 10);
        let names: Vec<&str> = ranked.iter().map(|o| o.provider.as_str()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
    }

    #[test]
    fn test_input_not_mutated() {
        let offers = vec![offer("A", Some(7.0))];
        let before = offers.clone();
        let _ = best_per_provider(&offers, 1);
        assert_eq!(offers, before);
    }
}
