//! Level command: perfect experience for a target level.

use std::io::Write;

use anyhow::Result;
use xp_core::perfect_experience_for;

pub fn run<W: Write>(writer: &mut W, level: u64, floor: bool) -> Result<()> {
    writeln!(writer, "{}", perfect_experience_for(level, !floor))?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_prints_ceiling_by_default() {
        let mut output = Vec::new();
        run(&mut output, 2499, false).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "15624999999\n");
    }

    #[test]
    fn test_level_floor() {
        let mut output = Vec::new();
        run(&mut output, 5, true).unwrap();
        assert_eq!(String::from_utf8(output).unwrap(), "126\n");
    }
}
