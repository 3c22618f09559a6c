//! Macros for ergonomic state identifier declaration.

/// Generate a state identifier enum and its `StateId` implementation.
///
/// The generated enum derives `Copy`, `Clone`, `PartialEq`, `Eq`,
/// `Hash`, and `Debug`, and labels each variant with its own name.
///
/// # Example
///
/// ```
/// use arbor::core::StateId;
/// use arbor::state_id_enum;
///
/// state_id_enum! {
///     pub enum WatchId {
///         Root,
///         ShowTime,
///         SetTime,
///     }
/// }
///
/// assert_eq!(WatchId::SetTime.label(), "SetTime");
/// ```
#[macro_export]
macro_rules! state_id_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::StateId for $name {
            fn label(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::core::StateId;

    state_id_enum! {
        enum TestId {
            First,
            Second,
        }
    }

    #[test]
    fn state_id_enum_macro_generates_labels() {
        assert_eq!(TestId::First.label(), "First");
        assert_eq!(TestId::Second.label(), "Second");
    }

    #[test]
    fn state_id_enum_supports_visibility() {
        state_id_enum! {
            pub enum PublicId {
                A,
                B,
            }
        }

        let _id = PublicId::A;
        assert_ne!(PublicId::A, PublicId::B);
    }

    #[test]
    fn generated_ids_are_usable_as_map_keys() {
        use std::collections::HashMap;

        let mut depths = HashMap::new();
        depths.insert(TestId::First, 0usize);
        depths.insert(TestId::Second, 1usize);

        assert_eq!(depths[&TestId::Second], 1);
    }
}
