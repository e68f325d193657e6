use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{Ident, LitFloat, LitInt, Token, parse_macro_input};

/// Creates a `FloatTrack` from keyframes checked at compile time.
///
/// Keyframes are written `time => value`, optionally followed by the
/// interpolation of the segment leaving the keyframe: `step` or `linear`
/// (the default). The keyframe list is validated during compilation, so the
/// expansion cannot fail at runtime.
///
/// # Format
///
/// - at least one keyframe
/// - times in `[0, 1)`, strictly increasing
/// - times and values are numeric literals, optionally negative
///
/// # Examples
///
/// ```ignore
/// use tripwire::track;
///
/// // Triangle pulse
/// let pulse = track![0.0 => 0.0, 0.25 => 1.0, 0.5 => 1.0, 0.75 => 0.0];
///
/// // Square gate held with step segments
/// let gate = track![0.0 => -1.0 step, 0.5 => 1 step];
/// ```
#[proc_macro]
pub fn track(input: TokenStream) -> TokenStream {
    let keys =
        parse_macro_input!(input with Punctuated::<KeyframeSpec, Token![,]>::parse_terminated);
    let keys: Vec<KeyframeSpec> = keys.into_iter().collect();

    match validate(&keys) {
        Ok(()) => {
            let keyframes = keys.iter().map(KeyframeSpec::expand);
            let expanded = quote! {
                tripwire::FloatTrack::from_validated_keyframes(&[#(#keyframes),*])
            };
            TokenStream::from(expanded)
        }
        Err(e) => {
            let error_msg = format!("Invalid track: {}", e);
            let expanded = quote! {
                compile_error!(#error_msg)
            };
            TokenStream::from(expanded)
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct KeyframeSpec {
    time: f64,
    value: f64,
    step: bool,
}

impl KeyframeSpec {
    fn expand(&self) -> TokenStream2 {
        let time = number_tokens(self.time);
        let value = number_tokens(self.value);
        let interpolation = if self.step {
            quote!(tripwire::Interpolation::Step)
        } else {
            quote!(tripwire::Interpolation::Linear)
        };
        quote! {
            tripwire::Keyframe {
                time: #time,
                value: #value,
                interpolation: #interpolation,
            }
        }
    }
}

impl Parse for KeyframeSpec {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let time = parse_number(input)?;
        input.parse::<Token![=>]>()?;
        let value = parse_number(input)?;

        let step = if input.peek(Ident) {
            let mode: Ident = input.parse()?;
            match mode.to_string().as_str() {
                "step" => true,
                "linear" => false,
                other => {
                    return Err(syn::Error::new(
                        mode.span(),
                        format!("unknown interpolation '{}', expected `step` or `linear`", other),
                    ));
                }
            }
        } else {
            false
        };

        Ok(KeyframeSpec { time, value, step })
    }
}

fn parse_number(input: ParseStream) -> syn::Result<f64> {
    let negative = input.peek(Token![-]);
    if negative {
        input.parse::<Token![-]>()?;
    }

    let lookahead = input.lookahead1();
    let magnitude = if lookahead.peek(LitFloat) {
        input.parse::<LitFloat>()?.base10_parse::<f64>()?
    } else if lookahead.peek(LitInt) {
        input.parse::<LitInt>()?.base10_parse::<f64>()?
    } else {
        return Err(lookahead.error());
    };

    Ok(if negative { -magnitude } else { magnitude })
}

fn number_tokens(number: f64) -> TokenStream2 {
    let magnitude = number.abs();
    if number.is_sign_negative() {
        quote!(-#magnitude)
    } else {
        quote!(#magnitude)
    }
}

fn validate(keys: &[KeyframeSpec]) -> Result<(), String> {
    if keys.is_empty() {
        return Err("no keyframes".to_string());
    }

    for (index, key) in keys.iter().enumerate() {
        if !(0.0..1.0).contains(&key.time) {
            return Err(format!(
                "keyframe {} time {} is outside [0, 1)",
                index, key.time
            ));
        }
        if index > 0 && key.time <= keys[index - 1].time {
            return Err(format!(
                "keyframe {} time {} is not after the previous keyframe",
                index, key.time
            ));
        }
        if !key.value.is_finite() {
            return Err(format!("keyframe {} value is not finite", index));
        }
    }
    Ok(())
}
