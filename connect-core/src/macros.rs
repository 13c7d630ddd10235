//! Declarative generators for shapes and wire enums
//!
//! Every request, result and value type in the model is declared through
//! [`shape!`], every closed-but-extensible string set through
//! [`wire_enum!`]. Callers must depend on `serde` directly.

/// Declares a model shape.
///
/// Each field line names its kind, the getter (same as the field), the
/// accessor names, the element type where one is needed, and the wire name:
///
/// ```ignore
/// connect_core::shape! {
///     /// Example request.
///     pub struct ExampleRequest {
///         string instance_id(set_instance_id, with_instance_id) => "InstanceId";
///         secret password(set_password, with_password) => "Password";
///         copy max_results(set_max_results, with_max_results): i32 => "MaxResults";
///         nested filters(set_filters, with_filters): Filters => "Filters";
///         list groupings(set_groupings, with_groupings, add_grouping): Grouping => "Groupings";
///         map tags(set_tags, with_tags, add_tags_entry, clear_tags_entries): String => "Tags";
///     }
/// }
/// ```
///
/// Every field is stored as `Option<_>`; a fresh shape has nothing set.
/// `secret` fields read and write as strings but are redacted in `Debug`
/// and `Display`.
/// The generated type derives `Clone`, `Default`, `PartialEq`, `Eq`, `Hash`
/// and serde, and renders through `Display` as `{Wire: value,...}`.
#[macro_export]
macro_rules! shape {
    (
        $(#[$meta:meta])*
        pub struct $Name:ident { $($body:tt)* }
    ) => {
        $crate::shape!(@munch [$(#[$meta])*] $Name [] [] $($body)*);
    };

    (@munch $attrs:tt $Name:ident [$($fields:tt)*] [$($methods:tt)*]
        $(#[$fmeta:meta])*
        string $field:ident($set:ident, $with:ident) => $wire:tt;
        $($rest:tt)*
    ) => {
        $crate::shape!(@munch $attrs $Name
            [$($fields)* $(#[$fmeta])* $field: ::std::string::String => $wire;]
            [$($methods)*
                pub fn $field(&self) -> ::std::option::Option<&str> {
                    self.$field.as_deref()
                }

                pub fn $set(&mut self, $field: ::std::option::Option<::std::string::String>) {
                    self.$field = $field;
                }

                pub fn $with(mut self, $field: impl ::std::convert::Into<::std::string::String>) -> Self {
                    self.$field = ::std::option::Option::Some($field.into());
                    self
                }
            ]
            $($rest)*);
    };

    (@munch $attrs:tt $Name:ident [$($fields:tt)*] [$($methods:tt)*]
        $(#[$fmeta:meta])*
        secret $field:ident($set:ident, $with:ident) => $wire:tt;
        $($rest:tt)*
    ) => {
        $crate::shape!(@munch $attrs $Name
            [$($fields)* $(#[$fmeta])* $field: $crate::value::Sensitive => $wire;]
            [$($methods)*
                pub fn $field(&self) -> ::std::option::Option<&str> {
                    self.$field.as_ref().map($crate::value::Sensitive::expose)
                }

                pub fn $set(&mut self, $field: ::std::option::Option<::std::string::String>) {
                    self.$field = $field.map($crate::value::Sensitive::from);
                }

                pub fn $with(mut self, $field: impl ::std::convert::Into<::std::string::String>) -> Self {
                    self.$field = ::std::option::Option::Some($crate::value::Sensitive::new($field));
                    self
                }
            ]
            $($rest)*);
    };

    (@munch $attrs:tt $Name:ident [$($fields:tt)*] [$($methods:tt)*]
        $(#[$fmeta:meta])*
        copy $field:ident($set:ident, $with:ident): $ty:ty => $wire:tt;
        $($rest:tt)*
    ) => {
        $crate::shape!(@munch $attrs $Name
            [$($fields)* $(#[$fmeta])* $field: $ty => $wire;]
            [$($methods)*
                pub fn $field(&self) -> ::std::option::Option<$ty> {
                    self.$field
                }

                pub fn $set(&mut self, $field: ::std::option::Option<$ty>) {
                    self.$field = $field;
                }

                pub fn $with(mut self, $field: impl ::std::convert::Into<$ty>) -> Self {
                    self.$field = ::std::option::Option::Some($field.into());
                    self
                }
            ]
            $($rest)*);
    };

    (@munch $attrs:tt $Name:ident [$($fields:tt)*] [$($methods:tt)*]
        $(#[$fmeta:meta])*
        nested $field:ident($set:ident, $with:ident): $ty:ty => $wire:tt;
        $($rest:tt)*
    ) => {
        $crate::shape!(@munch $attrs $Name
            [$($fields)* $(#[$fmeta])* $field: $ty => $wire;]
            [$($methods)*
                pub fn $field(&self) -> ::std::option::Option<&$ty> {
                    self.$field.as_ref()
                }

                pub fn $set(&mut self, $field: ::std::option::Option<$ty>) {
                    self.$field = $field;
                }

                pub fn $with(mut self, $field: impl ::std::convert::Into<$ty>) -> Self {
                    self.$field = ::std::option::Option::Some($field.into());
                    self
                }
            ]
            $($rest)*);
    };

    (@munch $attrs:tt $Name:ident [$($fields:tt)*] [$($methods:tt)*]
        $(#[$fmeta:meta])*
        list $field:ident($set:ident, $with:ident, $add:ident): $ty:ty => $wire:tt;
        $($rest:tt)*
    ) => {
        $crate::shape!(@munch $attrs $Name
            [$($fields)* $(#[$fmeta])* $field: ::std::vec::Vec<$ty> => $wire;]
            [$($methods)*
                pub fn $field(&self) -> ::std::option::Option<&[$ty]> {
                    self.$field.as_deref()
                }

                pub fn $set(&mut self, $field: ::std::option::Option<::std::vec::Vec<$ty>>) {
                    self.$field = $field;
                }

                /// Replaces the whole list.
                pub fn $with<I>(mut self, $field: I) -> Self
                where
                    I: ::std::iter::IntoIterator,
                    I::Item: ::std::convert::Into<$ty>,
                {
                    self.$field = ::std::option::Option::Some(
                        $field.into_iter().map(::std::convert::Into::into).collect(),
                    );
                    self
                }

                /// Appends one element, creating the list when unset.
                pub fn $add(mut self, item: impl ::std::convert::Into<$ty>) -> Self {
                    self.$field
                        .get_or_insert_with(::std::vec::Vec::new)
                        .push(item.into());
                    self
                }
            ]
            $($rest)*);
    };

    (@munch $attrs:tt $Name:ident [$($fields:tt)*] [$($methods:tt)*]
        $(#[$fmeta:meta])*
        map $field:ident($set:ident, $with:ident, $add:ident, $clear:ident): $ty:ty => $wire:tt;
        $($rest:tt)*
    ) => {
        $crate::shape!(@munch $attrs $Name
            [$($fields)* $(#[$fmeta])*
                $field: ::std::collections::BTreeMap<::std::string::String, $ty> => $wire;]
            [$($methods)*
                pub fn $field(
                    &self,
                ) -> ::std::option::Option<&::std::collections::BTreeMap<::std::string::String, $ty>> {
                    self.$field.as_ref()
                }

                pub fn $set(
                    &mut self,
                    $field: ::std::option::Option<::std::collections::BTreeMap<::std::string::String, $ty>>,
                ) {
                    self.$field = $field;
                }

                /// Replaces the whole map.
                pub fn $with<I, K, V>(mut self, $field: I) -> Self
                where
                    I: ::std::iter::IntoIterator<Item = (K, V)>,
                    K: ::std::convert::Into<::std::string::String>,
                    V: ::std::convert::Into<$ty>,
                {
                    self.$field = ::std::option::Option::Some(
                        $field
                            .into_iter()
                            .map(|(key, value)| (key.into(), value.into()))
                            .collect(),
                    );
                    self
                }

                /// Adds one entry, creating the map when unset.
                ///
                /// # Errors
                /// Returns `ModelError::DuplicateMapKey` when the key is already
                /// present; the map is left unchanged.
                pub fn $add(
                    &mut self,
                    key: impl ::std::convert::Into<::std::string::String>,
                    value: impl ::std::convert::Into<$ty>,
                ) -> ::std::result::Result<&mut Self, $crate::ModelError> {
                    $crate::map::insert_unique(
                        self.$field.get_or_insert_with(::std::collections::BTreeMap::new),
                        $wire,
                        key.into(),
                        value.into(),
                    )?;
                    ::std::result::Result::Ok(self)
                }

                /// Unsets the map.
                pub fn $clear(&mut self) -> &mut Self {
                    self.$field = ::std::option::Option::None;
                    self
                }
            ]
            $($rest)*);
    };

    (@munch [$($attr:tt)*] $Name:ident
        [$($(#[$fmeta:meta])* $field:ident: $fty:ty => $wire:tt;)*]
        [$($methods:tt)*]
    ) => {
        $($attr)*
        #[derive(
            Debug,
            Clone,
            Default,
            PartialEq,
            Eq,
            Hash,
            ::serde::Serialize,
            ::serde::Deserialize,
        )]
        pub struct $Name {
            $(
                $(#[$fmeta])*
                #[serde(rename = $wire, default, skip_serializing_if = "Option::is_none")]
                $field: ::std::option::Option<$fty>,
            )*
        }

        impl $Name {
            pub fn new() -> Self {
                Self::default()
            }

            $($methods)*
        }

        impl ::std::fmt::Display for $Name {
            #[allow(unused_mut)]
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                let mut out = $crate::display::ShapeWriter::new(f)?;
                $( out.field($wire, &self.$field)?; )*
                out.finish()
            }
        }

        impl $crate::display::FieldDisplay for $Name {
            fn fmt_field(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                ::std::fmt::Display::fmt(self, f)
            }
        }
    };
}

/// Declares an open string enum.
///
/// Known wire values map to variants; anything else is kept verbatim in
/// `Unknown` and written back out unchanged.
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        pub enum $Name:ident {
            $( $(#[$vmeta:meta])* $Variant:ident => $wire:literal, )*
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash)]
        pub enum $Name {
            $( $(#[$vmeta])* $Variant, )*
            /// A value this SDK version does not recognize.
            Unknown(::std::string::String),
        }

        impl $Name {
            /// Every wire value with a named variant.
            pub const fn known_values() -> &'static [&'static str] {
                &[$($wire),*]
            }

            pub fn as_str(&self) -> &str {
                match self {
                    $( $Name::$Variant => $wire, )*
                    $Name::Unknown(value) => value.as_str(),
                }
            }

            pub fn is_unknown(&self) -> bool {
                ::std::matches!(self, $Name::Unknown(_))
            }
        }

        impl ::std::convert::From<&str> for $Name {
            fn from(value: &str) -> Self {
                match value {
                    $( $wire => $Name::$Variant, )*
                    other => $Name::Unknown(other.to_owned()),
                }
            }
        }

        impl ::std::convert::From<::std::string::String> for $Name {
            fn from(value: ::std::string::String) -> Self {
                match value.as_str() {
                    $( $wire => $Name::$Variant, )*
                    _ => $Name::Unknown(value),
                }
            }
        }

        impl ::std::str::FromStr for $Name {
            type Err = ::std::convert::Infallible;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                ::std::result::Result::Ok(Self::from(s))
            }
        }

        impl ::std::fmt::Display for $Name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::display::FieldDisplay for $Name {
            fn fmt_field(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl $crate::validation::KnownValue for $Name {
            fn is_unknown(&self) -> bool {
                $Name::is_unknown(self)
            }

            fn wire_value(&self) -> &str {
                self.as_str()
            }
        }

        impl ::serde::Serialize for $Name {
            fn serialize<S>(&self, serializer: S) -> ::std::result::Result<S::Ok, S::Error>
            where
                S: ::serde::Serializer,
            {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> ::serde::Deserialize<'de> for $Name {
            fn deserialize<D>(deserializer: D) -> ::std::result::Result<Self, D::Error>
            where
                D: ::serde::Deserializer<'de>,
            {
                let value = <::std::string::String as ::serde::Deserialize>::deserialize(deserializer)?;
                ::std::result::Result::Ok(Self::from(value))
            }
        }
    };
}
