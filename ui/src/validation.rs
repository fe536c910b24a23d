/// Core validation trait that all validators must implement.
///
/// A validator checks its input and, on success, hands back the typed form
/// of it (`Output`), so parsing and validation happen in one step.
///
/// # Type Parameters
///
/// * `T` - The type of data being validated (can be unsized like `str`)
///
/// # Examples
///
/// ```
/// use cargotower::validation::Validator;
///
/// struct NonEmpty;
/// impl Validator<str> for NonEmpty {
///     type Output = ();
///     type Error = String;
///
///     fn validate(&self, input: &str) -> Result<(), Self::Error> {
///         if input.is_empty() {
///             Err("Input cannot be empty".to_string())
///         } else {
///             Ok(())
///         }
///     }
/// }
/// ```
pub trait Validator<T: ?Sized> {
    type Output;
    type Error;

    /// Validate the input and return its typed form, or the validation error
    fn validate(&self, input: &T) -> Result<Self::Output, Self::Error>;
}
