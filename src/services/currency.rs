//! # Servicio de Conversión de Divisas
//! src/services/currency.rs
//!
//! Handler para `/convertir?from=USD&to=EUR&amount=10`.
//!
//! Las tasas son fijas y están expresadas en unidades por 1 USD. Los errores
//! de este servicio viajan dentro del cuerpo JSON; el router siempre los
//! envuelve en un 200.

use crate::http::{Request, Response};
use serde::Serialize;

/// Tasas por 1 USD (valores de ejemplo, no cotizaciones reales)
const RATES: [(&str, f64); 6] = [
    ("USD", 1.0),
    ("EUR", 0.85),
    ("GBP", 0.75),
    ("COP", 4000.0),
    ("JPY", 150.0),
    ("MXN", 17.0),
];

/// Resultado de una conversión
#[derive(Debug, Serialize)]
struct Conversion<'a> {
    from: &'a str,
    to: &'a str,
    amount: f64,
    result: f64,
}

/// Error de parámetros
#[derive(Debug, Serialize)]
struct ConversionError {
    error: String,
}

/// Tasa de `currency` respecto al USD (sin distinguir mayúsculas)
pub fn rate_of(currency: &str) -> Option<f64> {
    RATES
        .iter()
        .find(|(code, _)| code.eq_ignore_ascii_case(currency))
        .map(|(_, rate)| *rate)
}

/// Convierte `amount` de `from` a `to`, redondeado a dos decimales
///
/// # Ejemplo
/// ```
/// use web_server::services::currency::convert;
///
/// assert_eq!(convert("USD", "EUR", 10.0), Some(8.5));
/// assert_eq!(convert("USD", "XXX", 10.0), None);
/// ```
pub fn convert(from: &str, to: &str, amount: f64) -> Option<f64> {
    let from_rate = rate_of(from)?;
    let to_rate = rate_of(to)?;
    let converted = amount / from_rate * to_rate;
    Some((converted * 100.0).round() / 100.0)
}

/// Handler para /convertir
///
/// # Query parameters
/// - `from`: Moneda de origen (requerido)
/// - `to`: Moneda de destino (requerido)
/// - `amount`: Monto, número finito (requerido)
///
/// # Ejemplo de response
/// ```json
/// {"from":"USD","to":"EUR","amount":10.0,"result":8.5}
/// ```
pub fn convert_handler(req: &Request, _resp: &mut Response) -> String {
    let (from, to, amount) = match (
        req.query_param("from"),
        req.query_param("to"),
        req.query_param("amount"),
    ) {
        (Some(from), Some(to), Some(amount)) => (from, to, amount),
        _ => return error_body("Missing required parameters: from, to, amount"),
    };

    let amount: f64 = match amount.trim().parse() {
        Ok(n) if f64::is_finite(n) => n,
        _ => return error_body("Parameter 'amount' must be a valid number"),
    };

    match convert(from, to, amount) {
        Some(result) if !result.is_finite() => {
            error_body("Parameter 'amount' is too large to convert")
        }
        Some(result) => {
            let body = Conversion {
                from,
                to,
                amount,
                result,
            };
            serde_json::to_string(&body)
                .unwrap_or_else(|e| error_body(&format!("Failed to encode result: {}", e)))
        }
        None => error_body(&format!("Unsupported currency pair: {} -> {}", from, to)),
    }
}

fn error_body(message: &str) -> String {
    let body = ConversionError {
        error: message.to_string(),
    };
    serde_json::to_string(&body).unwrap_or_else(|_| r#"{"error":"unknown"}"#.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::StatusCode;
    use serde_json::Value;

    fn call(line: &str) -> Value {
        let request = Request::parse_line(line).unwrap();
        let mut carrier = Response::new(StatusCode::Ok);
        let body = convert_handler(&request, &mut carrier);
        serde_json::from_str(&body).unwrap()
    }

    #[test]
    fn test_convert() {
        assert_eq!(convert("USD", "EUR", 10.0), Some(8.5));
        assert_eq!(convert("EUR", "USD", 8.5), Some(10.0));
        assert_eq!(convert("usd", "cop", 2.0), Some(8000.0));
        assert_eq!(convert("USD", "USD", 3.333), Some(3.33));
    }

    #[test]
    fn test_unknown_currency() {
        assert_eq!(convert("USD", "ABC", 1.0), None);
        assert_eq!(rate_of(""), None);
    }

    #[test]
    fn test_handler_ok() {
        let body = call("GET /convertir?from=USD&to=EUR&amount=10 HTTP/1.1");

        assert_eq!(body["from"], "USD");
        assert_eq!(body["to"], "EUR");
        assert_eq!(body["amount"], 10.0);
        assert_eq!(body["result"], 8.5);
    }

    #[test]
    fn test_handler_missing_params() {
        let body = call("GET /convertir?from=USD HTTP/1.1");
        assert!(body["error"].as_str().unwrap().contains("Missing"));
    }

    #[test]
    fn test_handler_invalid_amount() {
        for amount in ["abc", "NaN", "inf", ""] {
            let body = call(&format!("GET /convertir?from=USD&to=EUR&amount={} HTTP/1.1", amount));
            assert!(body["error"].as_str().unwrap().contains("amount"), "amount {:?}", amount);
        }
    }

    #[test]
    fn test_handler_result_overflow() {
        let body = call("GET /convertir?from=USD&to=COP&amount=1e306 HTTP/1.1");
        assert!(body["error"].as_str().unwrap().contains("too large"));
        assert!(body.get("result").is_none());
    }

    #[test]
    fn test_handler_unsupported_pair() {
        let body = call("GET /convertir?from=USD&to=XYZ&amount=1 HTTP/1.1");
        assert!(body["error"].as_str().unwrap().contains("XYZ"));
    }
}
