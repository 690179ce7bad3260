use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

mod from_readings;

#[proc_macro_derive(FromReadings, attributes(reading))]
pub fn derive_from_readings(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);
    match from_readings::expand_from_readings(&input) {
        Ok(tokens) => tokens,
        Err(err) => err.to_compile_error().into(),
    }
}
