//! Interactive form: one prompt per control, in form order.

use std::io::{self, BufRead, Write};

use ckd_core::{Control, ControlKind, Form, RawValue, Submission};

/// `[0-150, default 50]` or `[yes/no, default yes]`.
pub fn hint(control: &Control) -> String {
    match &control.kind {
        ControlKind::Number {
            min, max, default, ..
        } => format!("[{min}-{max}, default {default}]"),
        ControlKind::Select { options, default } => {
            format!("[{}, default {default}]", options.join("/"))
        }
    }
}

/// Prompt for every control not already in `submission`.
///
/// An empty line keeps the default. Invalid input is reported and asked
/// again. At end of input the remaining controls keep their defaults, unless
/// the last answer was rejected: that is an [`io::ErrorKind::UnexpectedEof`].
pub fn fill<R: BufRead, W: Write>(
    form: &Form,
    submission: &mut Submission,
    input: &mut R,
    output: &mut W,
) -> io::Result<()> {
    writeln!(output, "{}", form.title)?;
    writeln!(output)?;

    for control in &form.controls {
        if submission.contains(control.name) {
            continue;
        }
        let mut rejected = false;
        loop {
            write!(output, "{} {}: ", control.label, hint(control))?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                writeln!(output)?;
                if rejected {
                    return Err(io::Error::new(
                        io::ErrorKind::UnexpectedEof,
                        format!("input ended before a valid {} was given", control.name),
                    ));
                }
                return Ok(());
            }
            let line = line.trim();
            if line.is_empty() {
                break;
            }

            let value = parse(control, line);
            match control.validate(&value) {
                Ok(()) => {
                    submission.insert(control.name, value);
                    break;
                }
                Err(e) => {
                    rejected = true;
                    writeln!(output, "  {e}")?;
                }
            }
        }
    }
    Ok(())
}

/// Read text the way the control expects it; [`Control::validate`] reports
/// anything that doesn't fit.
fn parse(control: &Control, text: &str) -> RawValue {
    match control.kind {
        ControlKind::Number { .. } => match text.parse::<f64>() {
            Ok(n) => RawValue::Number(n),
            Err(_) => RawValue::Choice(text.to_string()),
        },
        ControlKind::Select { .. } => RawValue::Choice(text.to_string()),
    }
}
