use std::collections::VecDeque;

use cow_collections::linked::List;
use proptest::prelude::*;

// Model list edits on a VecDeque; indexed operations pick a valid index from the raw
// byte so every generated sequence is in bounds.
proptest! {
    #[test]
    fn prop_list_matches_deque(ops in proptest::collection::vec((0u8..=5, any::<u8>()), 1..200)) {
        let mut list: List<u8> = List::new();
        let mut model: VecDeque<u8> = VecDeque::new();

        for (op, a) in ops {
            match op {
                0 => {
                    list.push_back(a);
                    model.push_back(a);
                }
                1 => {
                    list.push_front(a);
                    model.push_front(a);
                }
                2 => prop_assert_eq!(list.pop_back(), model.pop_back()),
                3 => prop_assert_eq!(list.pop_front(), model.pop_front()),
                4 => {
                    let index = a as usize % (model.len() + 1);
                    list.insert(index, a);
                    model.insert(index, a);
                }
                5 => {
                    if !model.is_empty() {
                        let index = a as usize % model.len();
                        let removed = model.remove(index);
                        prop_assert_eq!(Some(list.remove(index)), removed);
                    }
                }
                _ => unreachable!(),
            }

            prop_assert_eq!(list.len(), model.len());
        }

        prop_assert!(list.iter().eq(model.iter()));
    }
}
