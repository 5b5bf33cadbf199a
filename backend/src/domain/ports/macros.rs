//! Defines helper macros for generating domain port error enums.
//!
//! Each variant gets a snake_case constructor; struct-like variants accept
//! `impl Into<T>` for every field.

macro_rules! define_port_error {
    (@ctor $variant:ident) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]() -> Self {
                Self::$variant
            }
        }
    };

    (@ctor $variant:ident { $($field:ident : $ty:ty),* $(,)? }) => {
        define_port_error!(@ctor_impl $variant () () $( $field : $ty, )*);
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) ) => {
        ::paste::paste! {
            #[doc = concat!("Construct [`Self::", stringify!($variant), "`].")]
            pub fn [<$variant:snake>]($($params)*) -> Self {
                Self::$variant { $($inits)* }
            }
        }
    };

    (@ctor_impl $variant:ident ($($params:tt)*) ($($inits:tt)*) $field:ident : $ty:ty, $($rest:tt)*) => {
        define_port_error!(
            @ctor_impl
            $variant
            ($($params)* $field: impl Into<$ty>,)
            ($($inits)* $field: $field.into(),)
            $($rest)*
        );
    };
    (
        $(#[$outer:meta])*
        pub enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident $( { $($field:ident : $ty:ty),* $(,)? } )? => $message:expr
            ),* $(,)?
        }
    ) => {
        $(#[$outer])*
        #[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
        #[allow(missing_docs, reason = "fields are described by the variant message")]
        pub enum $name {
            $(
                $(#[$variant_meta])*
                #[error($message)]
                $variant $( { $($field : $ty),* } )?,
            )*
        }

        impl $name {
            $(
                define_port_error!(@ctor $variant $( { $($field : $ty),* } )?);
            )*
        }
    };
}

pub(crate) use define_port_error;

#[cfg(test)]
mod tests {
    //! Regression coverage for this module.
    use crate::domain::RecipeId;

    define_port_error! {
        pub enum ExamplePortError {
            Missing { id: RecipeId } => "missing: {id}",
            Broken { message: String } => "broken: {message}",
            Mixed { message: String, attempts: u32 } => "mixed: {message} ({attempts})",
            Stopped => "stopped",
        }
    }

    #[test]
    fn constructors_accept_str_for_string_fields() {
        let err = ExamplePortError::broken("socket");
        assert_eq!(err.to_string(), "broken: socket");
    }

    #[test]
    fn constructors_preserve_domain_types() {
        let id = RecipeId::random();
        let err = ExamplePortError::missing(id);
        assert_eq!(err, ExamplePortError::Missing { id });
        assert_eq!(err.to_string(), format!("missing: {id}"));
    }

    #[test]
    fn constructors_support_mixed_fields() {
        let err = ExamplePortError::mixed("retry", 3_u32);
        assert_eq!(err.to_string(), "mixed: retry (3)");
    }

    #[test]
    fn unit_variants_get_constructors() {
        assert_eq!(ExamplePortError::stopped(), ExamplePortError::Stopped);
    }
}
