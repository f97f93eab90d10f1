//! Interactive valuation date prompt.

use std::io::{self, BufRead, Write};

use chrono::NaiveDate;
use fxfolio_core::utils::time_utils::{parse_valuation_date_or_today, valuation_date_today};

pub const DATE_PROMPT: &str = "Enter valuation date (yyyy-MM-dd), blank for today: ";

/// Asks for a valuation date until a valid one is entered.
///
/// A blank line means today. End of input also falls back to today.
pub fn prompt_valuation_date<R, W>(input: &mut R, output: &mut W) -> io::Result<NaiveDate>
where
    R: BufRead,
    W: Write,
{
    loop {
        write!(output, "{}", DATE_PROMPT)?;
        output.flush()?;

        let mut line = String::new();
        if input.read_line(&mut line)? == 0 {
            writeln!(output)?;
            return Ok(valuation_date_today());
        }

        match parse_valuation_date_or_today(&line) {
            Ok(date) => return Ok(date),
            Err(_) => {
                writeln!(
                    output,
                    "Invalid date '{}'. Please use the format yyyy-MM-dd.",
                    line.trim()
                )?;
            }
        }
    }
}
