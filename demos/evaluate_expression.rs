//! Evaluate a few expressions and show the assignments they perform.

use shellvars_rs::{Absent, Variables, evaluate};

fn main() {
    let mut vars = Variables::new();
    vars.insert("USER".to_string(), "alice".to_string());
    vars.insert("EDITOR".to_string(), String::new());

    for expr in [
        "home is ${HOME:-/home/$USER}",
        "editor: ${EDITOR:-vi} vs ${EDITOR-vi}",
        "${CACHE:=/tmp/cache}/${USER}",
        "${USER:+logged in as $USER}",
    ] {
        match evaluate(expr, &vars, Absent::Empty) {
            Ok(out) => {
                println!("{expr}");
                println!("  => {}", out.value);
                for (name, value) in &out.assignments {
                    println!("  assigned {name}={value}");
                }
            }
            Err(e) => println!("{expr}: {e}"),
        }
    }

    // With Skip, unknown variables are left for a later pass.
    let out = evaluate("$USER on ${HOST:-localhost}", &vars, Absent::Skip).unwrap();
    println!("skip => {}", out.value);
}
