//! Client-side conversation search
//!
//! Filtering is a pure view over the fetched list: it never reorders,
//! mutates, or touches the active selection.

use crate::types::Conversation;

/// Case-insensitive substring match of `query` within `title`.
pub fn matches_title(title: &str, query: &str) -> bool {
    if query.is_empty() {
        return true;
    }
    title.to_lowercase().contains(&query.to_lowercase())
}

/// Every conversation whose title contains `query`, in list order.
pub fn filter_conversations<'a>(conversations: &'a [Conversation], query: &str) -> Vec<&'a Conversation> {
    if query.is_empty() {
        return conversations.iter().collect();
    }

    let query = query.to_lowercase();
    conversations
        .iter()
        .filter(|c| c.title_text().to_lowercase().contains(&query))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn sample() -> Vec<Conversation> {
        vec![
            Conversation::new("1", "Trip Plan"),
            Conversation::new("2", "Recipe"),
            Conversation::new("3", "Road TRIP playlist"),
        ]
    }

    #[test]
    fn test_trip_matches_first_only() {
        let conversations = vec![Conversation::new("1", "Trip Plan"), Conversation::new("2", "Recipe")];

        let result = filter_conversations(&conversations, "trip");

        assert_eq!(result.len(), 1);
        assert_eq!(result[0].id.as_str(), "1");
    }

    #[test]
    fn test_empty_query_returns_all_in_order() {
        let conversations = sample();
        let ids: Vec<_> = filter_conversations(&conversations, "")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_case_insensitive() {
        let conversations = sample();
        let ids: Vec<_> = filter_conversations(&conversations, "TrIp")
            .iter()
            .map(|c| c.id.as_str())
            .collect();
        assert_eq!(ids, vec!["1", "3"]);
    }

    #[test]
    fn test_untitled_only_matches_empty_query() {
        let mut untitled = Conversation::new("4", "");
        untitled.title = None;
        let conversations = vec![untitled];

        assert_eq!(filter_conversations(&conversations, "").len(), 1);
        assert!(filter_conversations(&conversations, "untitled").is_empty());
    }

    #[test]
    fn test_no_match() {
        let conversations = sample();
        assert!(filter_conversations(&conversations, "zzz").is_empty());
    }

    #[test]
    fn test_matches_title_unicode() {
        assert!(matches_title("Ärger im Büro", "äRGER"));
        assert!(matches_title("anything", ""));
        assert!(!matches_title("", "x"));
    }

    proptest! {
        #[test]
        fn prop_filter_is_ordered_subset(
            titles in proptest::collection::vec("[a-zA-Z ]{0,12}", 0..12),
            query in "[a-zA-Z]{0,3}",
        ) {
            let conversations: Vec<Conversation> = titles
                .iter()
                .enumerate()
                .map(|(i, t)| Conversation::new(i.to_string(), t.clone()))
                .collect();

            let result = filter_conversations(&conversations, &query);

            prop_assert!(result.len() <= conversations.len());
            for c in &result {
                prop_assert!(c.title_text().to_lowercase().contains(&query.to_lowercase()));
            }

            // Order is preserved: ids are strictly increasing positions.
            let positions: Vec<usize> = result
                .iter()
                .map(|c| c.id.as_str().parse::<usize>().unwrap())
                .collect();
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_empty_query_is_identity(titles in proptest::collection::vec(".{0,8}", 0..8)) {
            let conversations: Vec<Conversation> = titles
                .iter()
                .enumerate()
                .map(|(i, t)| Conversation::new(i.to_string(), t.clone()))
                .collect();

            let result: Vec<Conversation> = filter_conversations(&conversations, "")
                .into_iter()
                .cloned()
                .collect();
            prop_assert_eq!(result, conversations);
        }
    }
}
