//! Helper macro for SMALLINT-backed choice enums.
//!
//! Each variant's discriminant is the value persisted in the database and
//! exchanged over the API; the label is the lowercase name used in logs and
//! error messages.

macro_rules! define_choice_enum {
    (
        $(#[$meta:meta])*
        $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $val:literal => $label:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[repr(i16)]
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $( $(#[$vmeta])* $variant = $val ),+
        }

        impl $name {
            /// Every variant, in discriminant order.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            /// Return the persisted choice ID.
            pub fn id(self) -> $crate::types::ChoiceId {
                self as $crate::types::ChoiceId
            }

            /// Resolve a persisted choice ID back into a variant.
            pub fn from_id(id: $crate::types::ChoiceId) -> Option<Self> {
                match id {
                    $( $val => Some($name::$variant), )+
                    _ => None,
                }
            }

            /// Lowercase display label.
            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }

        impl From<$name> for $crate::types::ChoiceId {
            fn from(value: $name) -> Self {
                value as $crate::types::ChoiceId
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}
