/// Appends `item` unless an equal element is already in `list`.
///
/// Returns `true` when the item was inserted.
pub fn add_if_not_present<T: PartialEq>(list: &mut Vec<T>, item: T) -> bool {
    if list.contains(&item) {
        return false;
    }
    list.push(item);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_is_idempotent() {
        let mut tags = vec!["math".to_string()];

        assert!(add_if_not_present(&mut tags, "physics".to_string()));
        assert_eq!(tags.len(), 2);

        assert!(!add_if_not_present(&mut tags, "physics".to_string()));
        assert_eq!(tags.len(), 2);
        assert_eq!(tags, vec!["math", "physics"]);
    }

    #[test]
    fn test_empty_list_takes_first_item() {
        let mut ids: Vec<u32> = Vec::new();
        add_if_not_present(&mut ids, 7);
        add_if_not_present(&mut ids, 7);
        add_if_not_present(&mut ids, 8);
        assert_eq!(ids, vec![7, 8]);
    }
}
