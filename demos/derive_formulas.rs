//! Prints closed forms of the motor operations by running them on symbolic
//! multivectors. Pass operation names to print a subset, e.g.
//! `cargo run --example derive_formulas -- sqrt log`.

use pga_motor::symbolic::{self, Expr};
use pga_motor::{Convention, Multivector, Precision, Result};

fn print(name: &str, mv: &Multivector<Expr>) {
    println!("{name} =");
    for (blade, c) in mv.terms() {
        println!("    {blade}: {c}");
    }
    println!();
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let selected: Vec<String> = std::env::args().skip(1).collect();
    let wanted = |name: &str| selected.is_empty() || selected.iter().any(|s| s == name);
    let precision = Precision::default();

    if wanted("product") {
        let m = symbolic::motor("s", "ps", "e", "v");
        print("motor * point", &(&m * &symbolic::point("p")).simplify());
    }
    if wanted("sandwich") {
        let m = symbolic::simple_motor("s", "e", "v");
        print("motor >> point", &(m >> symbolic::point("p")).simplify());
    }
    if wanted("inverse") {
        print("inverse(motor)", &symbolic::motor("s", "ps", "e", "v").inverse()?);
    }
    if wanted("sqrt") {
        print("sqrt(motor)", &symbolic::motor("s", "ps", "e", "v").sqrt()?);
    }
    for convention in [Convention::Gunn, Convention::Pga4cs] {
        let line = symbolic::line("e", "v");
        if wanted("exp") {
            print(
                &format!("exp(line), {convention:?}"),
                &line.exp_with(convention, &precision).simplify(),
            );
        }
        if wanted("log") {
            let m = symbolic::motor("s", "ps", "e", "v");
            print(
                &format!("log(motor), {convention:?}"),
                &m.log_with(convention, &precision)?.simplify(),
            );
        }
    }
    if wanted("point") {
        let from = symbolic::point("a");
        let to = symbolic::point("b");
        print(
            "motor taking point a to point b",
            &Multivector::motor_between(&from, &to, &precision)?.simplify(),
        );
    }
    Ok(())
}
