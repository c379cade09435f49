use anyhow::{bail, Context, Result};
use std::io::{BufRead, Write};
use std::path::{Path, PathBuf};

use crate::models::ScrapeMode;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveChoice {
    Skip,
    Save(PathBuf),
}

/// Line-oriented interactive prompts. Generic over the streams so the menu
/// can be driven from tests.
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    fn ask(&mut self, question: &str) -> Result<String> {
        write!(self.output, "{}", question)?;
        self.output.flush()?;
        self.read_line()
    }

    /// A closed input stream is the one unrecoverable condition.
    fn read_line(&mut self) -> Result<String> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            bail!("Input stream closed");
        }
        Ok(line.trim().to_string())
    }

    pub fn say(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub fn choose_mode(&mut self) -> Result<ScrapeMode> {
        self.say("Amazon Product Scraper")?;
        self.say("  1) Scrape a single product")?;
        self.say("  2) Scrape multiple products")?;
        loop {
            match self.ask("Select mode [1/2]: ")?.as_str() {
                "1" => return Ok(ScrapeMode::Single),
                "2" => return Ok(ScrapeMode::Bulk),
                other => self.say(&format!("Invalid choice '{}', enter 1 or 2", other))?,
            }
        }
    }

    pub fn read_url(&mut self) -> Result<String> {
        loop {
            let url = self.ask("Enter product URL: ")?;
            if !url.is_empty() {
                return Ok(url);
            }
        }
    }

    /// One URL per line, finished by a blank line.
    pub fn read_url_list(&mut self, advisory_max: usize) -> Result<Vec<String>> {
        self.say(&format!(
            "Enter product URLs, one per line (up to {} recommended). Finish with an empty line:",
            advisory_max
        ))?;
        let mut urls = Vec::new();
        loop {
            let line = self.ask(&format!("URL {}: ", urls.len() + 1))?;
            if line.is_empty() {
                break;
            }
            urls.push(line);
        }
        Ok(urls)
    }

    pub fn ask_save(&mut self, default_path: &Path) -> Result<SaveChoice> {
        loop {
            let answer = self.ask("Save results to JSON? [y/N]: ")?.to_lowercase();
            match answer.as_str() {
                "" | "n" | "no" => return Ok(SaveChoice::Skip),
                "y" | "yes" => break,
                _ => self.say("Please answer y or n")?,
            }
        }

        let path = self.ask(&format!("Output file [{}]: ", default_path.display()))?;
        if path.is_empty() {
            Ok(SaveChoice::Save(default_path.to_path_buf()))
        } else {
            Ok(SaveChoice::Save(PathBuf::from(path)))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn prompt(input: &str) -> Prompt<Cursor<Vec<u8>>, Vec<u8>> {
        Prompt::new(Cursor::new(input.as_bytes().to_vec()), Vec::new())
    }

    #[test]
    fn mode_menu_reprompts_on_invalid_choice() {
        let mut p = prompt("3\n\n2\n");
        assert_eq!(p.choose_mode().unwrap(), ScrapeMode::Bulk);
        let shown = String::from_utf8(p.output).unwrap();
        assert!(shown.contains("Invalid choice '3'"));
    }

    #[test]
    fn url_list_ends_at_blank_line() {
        let mut p = prompt(
            "https://www.amazon.com/dp/B000000001\n  https://www.amazon.com/dp/B000000002 \n\nleftover\n",
        );
        assert_eq!(
            p.read_url_list(50).unwrap(),
            vec![
                "https://www.amazon.com/dp/B000000001",
                "https://www.amazon.com/dp/B000000002"
            ]
        );
    }

    #[test]
    fn closed_input_is_an_error() {
        let mut p = prompt("");
        assert!(p.read_url().is_err());
        let mut p = prompt("https://www.amazon.com/dp/B000000001\n");
        assert!(p.read_url_list(50).is_err());
    }

    #[test]
    fn save_defaults() {
        let default = Path::new("amazon_products_20240309_140507.json");
        assert_eq!(prompt("\n").ask_save(default).unwrap(), SaveChoice::Skip);
        assert_eq!(
            prompt("y\n\n").ask_save(default).unwrap(),
            SaveChoice::Save(default.to_path_buf())
        );
        assert_eq!(
            prompt("maybe\nYES\nout/run.json\n").ask_save(default).unwrap(),
            SaveChoice::Save(PathBuf::from("out/run.json"))
        );
    }
}
