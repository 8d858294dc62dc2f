//! Runs a built-in sample program and prints the final variable scope.
//!
//! Usage: `minipascal [--untyped] [--tokens | --ast]`

use anyhow::{bail, Context};
use minipascal::{tokenize, Calculator, Dialect, Lexer, Parser};

const TYPED_SAMPLE: &str = r#"
PROGRAM Part10;
VAR
   number     : INTEGER;
   a, b, c, x : INTEGER;
   y          : REAL;

BEGIN {Part10}
   BEGIN
      number := 2;
      a := number;
      b := 10 * a + 10 * number DIV 4;
      c := a - - b
   END;
   x := 11;
   y := 20 / 7 + 3.14;
   NUMBER := 3
END.  {Part10}
"#;

const UNTYPED_SAMPLE: &str = r#"
Begin
  begin
    nUmber := 2;
    a := nUmber;
    b := 10 * a + 10 * nUmber DIV 4;
    _c := a - - b
  end;
  x := 11;
  number := 3;
END.
"#;

enum Mode {
    Run,
    Tokens,
    Ast,
}

fn main() -> anyhow::Result<()> {
    let mut dialect = Dialect::Typed;
    let mut mode = Mode::Run;

    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--untyped" => dialect = Dialect::Untyped,
            "--tokens" => mode = Mode::Tokens,
            "--ast" => mode = Mode::Ast,
            other => bail!("unknown argument '{}'", other),
        }
    }

    let source = match dialect {
        Dialect::Typed => TYPED_SAMPLE,
        Dialect::Untyped => UNTYPED_SAMPLE,
    };

    match mode {
        Mode::Tokens => {
            for token in tokenize(source).context("tokenizing sample")? {
                println!("{}", token);
            }
        }
        Mode::Ast => {
            let program = Parser::with_dialect(Lexer::new(source), dialect)?
                .parse_program()
                .context("parsing sample")?;
            println!("{}", serde_json::to_string_pretty(&program)?);
        }
        Mode::Run => {
            let program = Parser::with_dialect(Lexer::new(source), dialect)?
                .parse_program()
                .context("parsing sample")?;
            let mut calculator = Calculator::with_dialect(dialect);
            calculator.run(&program).context("running sample")?;

            println!("Tree has been traversed!");
            for (name, value) in calculator.scope().iter() {
                println!("{} = {}", name, value);
            }
        }
    }

    Ok(())
}
