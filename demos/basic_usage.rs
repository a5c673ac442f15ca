// ============================================================================
// Basic Usage Example
// ============================================================================
//
// Run with `--features logging` to see diagnostics on stderr.

use radix_number::prelude::*;
use std::sync::Arc;

fn main() {
    #[cfg(feature = "logging")]
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    println!("=== Radix Number Example ===\n");

    let ctx = ContextBuilder::new()
        .precision(40)
        .auto_multiplication()
        .newton_raphson_division()
        .build(Arc::new(LoggingDiagnosticHandler))
        .unwrap();

    println!(
        "Context: {} digits, {} multiplication, {} division\n",
        ctx.precision(),
        ctx.multiplication_algorithm(),
        ctx.division_algorithm()
    );

    // Base 9 arithmetic from text
    println!("=== Base 9 ===");
    let five: Number = ">+5.*9^+0".parse().unwrap();
    let three: Number = ">+3*9".parse().unwrap();
    let sum = ctx.add(&five, &three).unwrap();
    println!("5 + 3 = {}", sum);
    let product = ctx.mul(&sum, &three).unwrap();
    println!("8 * 3 = {}  (as i64: {})", product, product.to_i64().unwrap());

    // Fractions in binary
    println!("\n=== Binary ===");
    let seven = Number::from_i64(7, Base::BINARY);
    let two = Number::from_i64(2, Base::BINARY);
    let half = ctx.div(&seven, &two).unwrap();
    println!("7 / 2 = {} = {}", half, half.to_f64());
    println!("floor  = {}", ctx.floor(&half));

    // Constants and transcendental functions
    println!("\n=== Constants ===");
    println!("e  = {}", ctx.e(Base::DECIMAL));
    println!("pi = {}", ctx.pi(Base::DECIMAL));
    let two_dec = Number::from_i64(2, Base::DECIMAL);
    println!("sqrt 2 = {}", ctx.sqrt(&two_dec).unwrap());
    println!("ln 2   = {}", ctx.ln(&two_dec).unwrap());
    println!("pi in base 16 = {}", ctx.pi(Base::HEXADECIMAL));

    // Edge cases produce values plus diagnostics
    println!("\n=== Edge Cases ===");
    let collector = Arc::new(CollectingDiagnosticHandler::new());
    let watched = ContextBuilder::new()
        .build(collector.clone())
        .unwrap();
    let inf = watched.div(&two_dec, &Number::zero(Base::DECIMAL)).unwrap();
    let floored = watched.factorial(&Number::from_f64(5.5, Base::DECIMAL, 4).unwrap()).unwrap();
    println!("2 / 0 = {}", inf);
    println!("5.5!  = {}", floored.to_i64().unwrap());
    for diagnostic in collector.take() {
        println!("  diagnostic: {}", diagnostic);
    }

    // Interchange formats
    println!("\n=== Encodings ===");
    let x = Number::from_digits(true, &[1, 0, 11], Base::new(12).unwrap(), 1).unwrap();
    println!("radix (big):    {}", x.to_radix_string().unwrap());
    println!("radix (little): {}", x.to_radix_string_with(Endianness::Little).unwrap());
    println!("record:         {}", x.to_record_string_compact().unwrap());
    println!("{}", x.to_record_string().unwrap());
}
