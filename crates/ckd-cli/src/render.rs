//! Output rendering for predictions and the form description.

use std::io::{self, Write};

use ckd_core::{Form, PredictionResult};

use crate::prompt::hint;

/// `Prediction: <label>`, then the recommendations if there are any.
pub fn result<W: Write>(result: &PredictionResult, out: &mut W) -> io::Result<()> {
    writeln!(out, "Prediction: {}", result.label)?;
    if !result.advice.is_empty() {
        writeln!(out)?;
        writeln!(out, "Recommendations:")?;
        for line in &result.advice {
            writeln!(out, "- {line}")?;
        }
    }
    Ok(())
}

pub fn result_json<W: Write>(result: &PredictionResult, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)
}

/// One line per control: field name, label, bounds or options.
pub fn form<W: Write>(form: &Form, out: &mut W) -> io::Result<()> {
    writeln!(out, "{}", form.title)?;
    writeln!(out)?;
    let width = form.controls.iter().map(|c| c.name.len()).max().unwrap_or(0);
    for control in &form.controls {
        writeln!(
            out,
            "  {:<width$}  {} {}",
            control.name,
            control.label,
            hint(control)
        )?;
    }
    Ok(())
}

pub fn form_json<W: Write>(form: &Form, out: &mut W) -> io::Result<()> {
    serde_json::to_writer_pretty(&mut *out, form)?;
    writeln!(out)
}
