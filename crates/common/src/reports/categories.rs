//! Category aggregation
//!
//! Splits multi-category fields into tokens, joins codes against the
//! category map, and ranks display names by total count.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Occurrences of one raw category code
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeCount {
    pub code: String,
    pub count: i64,
}

/// Total for one display name after the map join
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub name: String,
    pub count: i64,
}

/// Count each whitespace-separated token once. Null and empty fields
/// contribute nothing. Output is ordered by count descending, then code.
pub fn tally_tokens<'a, I>(fields: I) -> Vec<CodeCount>
where
    I: IntoIterator<Item = Option<&'a str>>,
{
    let mut counts: HashMap<&'a str, i64> = HashMap::new();
    for field in fields.into_iter().flatten() {
        for token in field.split_whitespace() {
            *counts.entry(token).or_insert(0) += 1;
        }
    }

    let mut tallied: Vec<CodeCount> = counts
        .into_iter()
        .map(|(code, count)| CodeCount {
            code: code.to_string(),
            count,
        })
        .collect();
    tallied.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.code.cmp(&b.code)));
    tallied
}

/// Left-join codes against `names`, falling back to the raw code, then
/// sum counts per display name. Sorted by count descending, ties broken
/// by name ascending. Not truncated.
pub fn aggregate_by_name(codes: &[CodeCount], names: &HashMap<String, String>) -> Vec<CategoryTotal> {
    let mut totals: HashMap<&str, i64> = HashMap::new();
    for entry in codes {
        let name = names
            .get(&entry.code)
            .map(String::as_str)
            .unwrap_or(entry.code.as_str());
        *totals.entry(name).or_insert(0) += entry.count;
    }

    let mut ranked: Vec<CategoryTotal> = totals
        .into_iter()
        .map(|(name, count)| CategoryTotal {
            name: name.to_string(),
            count,
        })
        .collect();
    ranked.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.name.cmp(&b.name)));
    ranked
}

/// Ranked display totals truncated to `top_n`
pub fn rank_categories(
    codes: &[CodeCount],
    names: &HashMap<String, String>,
    top_n: usize,
) -> Vec<CategoryTotal> {
    let mut ranked = aggregate_by_name(codes, names);
    ranked.truncate(top_n);
    ranked
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn names(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(code, name)| (code.to_string(), name.to_string()))
            .collect()
    }

    fn code(code: &str, count: i64) -> CodeCount {
        CodeCount { code: code.to_string(), count }
    }

    #[test]
    fn test_tally_splits_tokens() {
        let fields = vec![Some("cs.CL cs.LG"), Some("cs.CL"), Some("stat.ML  cs.LG cs.CL")];
        let tallied = tally_tokens(fields);
        assert_eq!(
            tallied,
            vec![code("cs.CL", 3), code("cs.LG", 2), code("stat.ML", 1)]
        );
    }

    #[test]
    fn test_tally_skips_null_and_empty() {
        let fields = vec![None, Some(""), Some("   "), Some("math.CO")];
        assert_eq!(tally_tokens(fields), vec![code("math.CO", 1)]);
        assert!(tally_tokens(Vec::<Option<&str>>::new()).is_empty());
    }

    #[test]
    fn test_unmapped_code_falls_back_to_raw() {
        let map = names(&[("cs.CL", "Computation and Language")]);
        let ranked = rank_categories(&[code("cs.CL", 4), code("q-bio.XX", 7)], &map, 15);
        assert_eq!(
            ranked,
            vec![
                CategoryTotal { name: "q-bio.XX".into(), count: 7 },
                CategoryTotal { name: "Computation and Language".into(), count: 4 },
            ]
        );
    }

    #[test]
    fn test_codes_sharing_a_name_are_summed() {
        let map = names(&[
            ("cs.AI", "Artificial Intelligence"),
            ("cs.ai", "Artificial Intelligence"),
            ("cs.LG", "Machine Learning"),
        ]);
        let ranked = rank_categories(&[code("cs.AI", 3), code("cs.LG", 4), code("cs.ai", 2)], &map, 15);
        assert_eq!(ranked[0], CategoryTotal { name: "Artificial Intelligence".into(), count: 5 });
        assert_eq!(ranked[1], CategoryTotal { name: "Machine Learning".into(), count: 4 });
    }

    #[test]
    fn test_ties_ordered_by_name() {
        let ranked = rank_categories(&[code("b", 2), code("a", 2), code("c", 5)], &HashMap::new(), 15);
        let order: Vec<&str> = ranked.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(order, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_truncates_to_top_n() {
        let codes: Vec<CodeCount> = (0..20).map(|i| code(&format!("c{:02}", i), i + 1)).collect();
        let ranked = rank_categories(&codes, &HashMap::new(), 15);
        assert_eq!(ranked.len(), 15);
        assert_eq!(ranked[0].count, 20);
        assert_eq!(ranked[14].count, 6);
    }

    proptest! {
        #[test]
        fn aggregation_preserves_token_count(
            fields in proptest::collection::vec(
                proptest::option::of(proptest::collection::vec("(cs|math|stat)\\.[A-C]{1,2}", 0..4)),
                0..40,
            )
        ) {
            let joined: Vec<Option<String>> = fields
                .iter()
                .map(|f| f.as_ref().map(|tokens| tokens.join(" ")))
                .collect();
            let expected: i64 = fields.iter().flatten().map(|tokens| tokens.len() as i64).sum();

            let tallied = tally_tokens(joined.iter().map(|f| f.as_deref()));
            let map = names(&[("cs.A", "Shared"), ("math.A", "Shared"), ("stat.B", "Stats")]);
            let ranked = aggregate_by_name(&tallied, &map);

            prop_assert_eq!(tallied.iter().map(|c| c.count).sum::<i64>(), expected);
            prop_assert_eq!(ranked.iter().map(|c| c.count).sum::<i64>(), expected);
        }
    }
}
