//! Macros to reduce boilerplate in the codebase

/// Declare a wire enum: a closed set of lowercase string values shared with
/// the REST service.
///
/// Generates the enum with serde renames, `VALUES`, `as_str`, `Display`, and a
/// case-insensitive `FromStr` that reports the accepted values on failure.
///
/// # Usage
///
/// ```rust,ignore
/// wire_enum! {
///     /// Lifecycle of a task
///     pub enum TaskStatus("task status") {
///         Pending => "pending",
///         InProgress => "in-progress",
///         Completed => "completed",
///     }
/// }
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident ($field:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $str:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        $vis enum $name {
            $( $(#[$vmeta])* #[serde(rename = $str)] $variant, )+
        }

        impl $name {
            pub const VALUES: &'static [&'static str] = &[$($str),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl std::str::FromStr for $name {
            type Err = $crate::error::OfficeError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok($name::$variant),)+
                    _ => Err($crate::error::OfficeError::invalid_value($field, s, Self::VALUES)),
                }
            }
        }
    };
}
