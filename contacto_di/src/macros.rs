/// Declares a provider struct.
///
/// Plain fields are handed out by cloning. A `..field: Base { Types, }` entry
/// delegates the listed types to another provider. The generated struct has
/// an extra `built` field holding the [`BuildCache`](crate::BuildCache).
#[macro_export]
macro_rules! provider {
    (@clone $ident:ident, $field:ident: $ty:ty) => {
        impl $crate::Build<$ident> for $ty {
            fn build(provider: &mut $ident) -> Self {
                provider.$field.clone()
            }
        }
    };

    (@delegate $ident:ident, $base_field:ident: $ty:ty) => {
        impl $crate::Build<$ident> for $ty {
            fn build(provider: &mut $ident) -> Self {
                $crate::Provide::provide(&mut provider.$base_field)
            }
        }
    };

    ($(#[doc=$doc:literal])* $vis:vis $ident:ident {
        $( $field:ident: $ty:ty, )*
        $( .. $base_field:ident: $base:ty { $($delegated:ty,)* $(,)? } )*
    }) => {
        $(#[doc=$doc])*
        $vis struct $ident {
            built: $crate::BuildCache,
            $( $field: $ty, )*
            $( $base_field: $base, )*
        }

        impl $crate::Provider for $ident {
            fn cache(&mut self) -> &mut $crate::BuildCache {
                &mut self.built
            }
        }

        $( $crate::provider!(@clone $ident, $field: $ty); )*
        $($( $crate::provider!(@delegate $ident, $base_field: $delegated); )*)*
    };
}
