use std::collections::HashSet;

use proc_macro::TokenStream;
use quote::{ToTokens, format_ident, quote};
use syn::{
    Data, DeriveInput, Error, Expr, ExprClosure, Field, Fields, Ident, Pat, Result, Token, Type,
    parse::{Parse, ParseStream},
    spanned::Spanned,
};

/// Reported reading names, their `Reading` variants, and whether each is
/// delivered as a `u8`.
const READINGS: [(&str, &str, bool); 5] = [
    ("Vbattery", "BatteryVoltage", false),
    ("Vsystem", "SystemVoltage", false),
    ("Boot", "Boot", true),
    ("TemperatureC", "TemperatureC", false),
    ("DifferentialPressure", "DifferentialPressure", false),
];

pub(crate) fn expand_from_readings(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        return Err(Error::new(
            input.span(),
            "`FromReadings` may only be derived on structs.",
        ));
    };

    let Fields::Named(fields) = &data.fields else {
        return Err(Error::new(
            input.span(),
            "`FromReadings` may only be derived on structs with named fields.",
        ));
    };

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .map(Result::transpose)
        .flatten() // Skip fields without an attribute.
        .collect::<Result<Vec<_>>>()?;

    let mut seen = HashSet::new();
    let mut u8_cases = Vec::new();
    let mut f64_cases = Vec::new();

    for field in fields {
        let key = field.reading.to_string();

        if !seen.insert(key.clone()) {
            return Err(Error::new_spanned(
                &field.reading,
                "Readings must be unique.",
            ));
        }

        let (primitive, cases) = if field.is_byte {
            (quote! { u8 }, &mut u8_cases)
        } else {
            (quote! { f64 }, &mut f64_cases)
        };

        let name = &field.name;

        let assignment = if let Some(Handler { acc, val, body }) = &field.handler {
            let field_type = &field.ty;

            // Closure parameters are not inferred from an immediate call.
            let val = match val {
                Pat::Type(_) => val.to_token_stream(),
                _ => quote! { #val: #primitive },
            };

            quote! {
                (|#acc: &mut #field_type, #val| { #body })(&mut self.#name, value)
            }
        } else {
            quote! {
                self.#name = Some(value)
            }
        };

        let variant = &field.variant;
        cases.push(quote! { Reading::#variant => { #assignment } });
    }

    let add_u8 = (!u8_cases.is_empty()).then(|| {
        quote! {
            fn add_u8(&mut self, reading: Reading, value: u8) {
                match reading {
                    #(#u8_cases)*
                    _ => {}
                };
            }
        }
    });

    let add_f64 = (!f64_cases.is_empty()).then(|| {
        quote! {
            fn add_f64(&mut self, reading: Reading, value: f64) {
                match reading {
                    #(#f64_cases)*
                    _ => {}
                };
            }
        }
    });

    let name = &input.ident;
    let (impl_generics, ty_generics, where_clause) = input.generics.split_for_impl();

    let expanded = quote! {
        impl #impl_generics FromReadings for #name #ty_generics #where_clause {
            #add_u8
            #add_f64
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    ty: Type,
    reading: Ident,
    variant: Ident,
    is_byte: bool,
    handler: Option<Handler>,
}

#[derive(Debug)]
struct Handler {
    acc: Pat,
    val: Pat,
    body: Expr,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Option<Self>> {
        let Some(attr) = field.attrs.iter().find(|a| a.path().is_ident("reading")) else {
            return Ok(None);
        };

        let Some(name) = field.ident.clone() else {
            return Err(Error::new_spanned(field, "Field must be named."));
        };

        let ReadingAttribute { reading, handler } = attr.meta.require_list()?.parse_args()?;

        let Some(&(_, variant, is_byte)) = READINGS.iter().find(|(key, ..)| reading == key)
        else {
            return Err(Error::new_spanned(
                &reading,
                "Unknown reading. Expected one of `Vbattery`, `Vsystem`, `Boot`, \
                 `TemperatureC` or `DifferentialPressure`.",
            ));
        };

        let handler = match handler {
            Some(handler) => Some(Handler::parse(handler)?),
            None => {
                let Type::Path(path) = &field.ty else {
                    return Err(Error::new_spanned(
                        &field.ty,
                        "Field must have a type annotation.",
                    ));
                };

                let Some(segment) = path.path.segments.first() else {
                    return Err(Error::new_spanned(
                        &path.path.segments,
                        "Field must have a type annotation.",
                    ));
                };

                if segment.ident != "Option" {
                    return Err(Error::new_spanned(
                        &segment.ident,
                        "Field without a handler must have type `Option<T>`.",
                    ));
                }

                None
            }
        };

        Ok(Some(Self {
            name,
            ty: field.ty.clone(),
            variant: format_ident!("{}", variant, span = reading.span()),
            reading,
            is_byte,
            handler,
        }))
    }
}

impl Handler {
    fn parse(closure: ExprClosure) -> Result<Self> {
        let mut inputs = closure.inputs.iter();

        let (Some(acc), Some(val), None) = (inputs.next(), inputs.next(), inputs.next()) else {
            return Err(Error::new_spanned(
                &closure,
                "Handler closure must have two parameters.",
            ));
        };

        if let Pat::Type(pat_type) = acc {
            return Err(Error::new_spanned(
                pat_type,
                "Handler closure's first parameter is typed from the field and must not be annotated.",
            ));
        }

        Ok(Self {
            acc: acc.clone(),
            val: val.clone(),
            body: (*closure.body).clone(),
        })
    }
}

#[derive(Debug)]
struct ReadingAttribute {
    reading: Ident,
    handler: Option<ExprClosure>,
}

impl Parse for ReadingAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let reading = input.parse::<Ident>()?;

        let handler = if !input.is_empty() {
            input.parse::<Token![,]>()?;
            Some(input.parse::<ExprClosure>()?)
        } else {
            None
        };

        Ok(Self { reading, handler })
    }
}
