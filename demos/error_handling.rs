//! Demonstrate the error kinds surfaced by evaluation.

use shellvars_rs::{Error, Options, Syntax, Variables, evaluate_with};

fn main() {
    let vars = Variables::new();

    // `?` with no word generates a message.
    report("${DATABASE_URL?}", &vars, Options::default());

    // `?` with a word uses the expanded word.
    report(
        "${DATABASE_URL:?set DATABASE_URL before starting}",
        &vars,
        Options::default(),
    );

    // Malformed syntax is text by default, an error in strict mode.
    let strict = Options {
        syntax: Syntax::Strict,
        ..Options::default()
    };
    report("${PORT:-8080", &vars, Options::default());
    report("${PORT:-8080", &vars, strict);

    // Absent policies are parsed from text.
    match "sometimes".parse::<shellvars_rs::Absent>() {
        Ok(absent) => println!("absent policy: {absent}"),
        Err(e) => println!("Config error: {}", Error::from(e)),
    }
}

fn report(expr: &str, vars: &Variables, options: Options) {
    match evaluate_with(expr, vars, options) {
        Ok(out) => println!("{expr} => {:?}", out.value),
        Err(Error::Evaluation(e)) => println!("{expr}: evaluation error: {}", e.message),
        Err(Error::Parse(e)) => {
            println!("{expr}: parse error: {e}");
            println!("  Kind: {:?}", e.kind);
            println!("  Location: line {}, column {}", e.span.line, e.span.column);
        }
        Err(Error::Config(e)) => println!("{expr}: config error: {e}"),
    }
}
