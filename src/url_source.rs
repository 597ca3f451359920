use anyhow::Result;
use csv::ReaderBuilder;
use log::error;
use std::fs::File;
use std::io::{self, BufRead, Write};
use std::path::Path;

/// Links gathered for the `clean` command.
pub struct UrlSource {
    pub urls: Vec<String>,
}

impl UrlSource {
    pub fn new(urls: &[String], src_files: &[String]) -> Result<Self> {
        let mut source = UrlSource { urls: Vec::new() };

        source.collect_urls(urls, src_files)?;

        if source.urls.is_empty() {
            source.prompt_for_input()?;
        }

        Ok(source)
    }

    fn collect_urls(&mut self, urls: &[String], src_files: &[String]) -> Result<()> {
        self.urls.extend(
            urls.iter()
                .map(|u| u.trim().to_string())
                .filter(|u| !u.is_empty()),
        );

        for file_path in src_files {
            self.urls.extend(urls_from_file(file_path)?);
        }

        Ok(())
    }

    fn prompt_for_input(&mut self) -> Result<()> {
        eprintln!("Enter/paste the link(s) to clean, comma-separated:");
        io::stderr().flush()?;

        let stdin = io::stdin();
        let mut lines = stdin.lock().lines();

        loop {
            let line = match lines.next() {
                Some(line) => line?,
                None => return Ok(()),
            };

            let parsed = split_input(&line);
            if !parsed.is_empty() {
                self.urls = parsed;
                return Ok(());
            }
            error!("No input provided. Try again.");
        }
    }
}

/// Every non-empty CSV field is taken as one link. Missing files are skipped.
pub fn urls_from_file(file_path: &str) -> Result<Vec<String>> {
    let path = Path::new(file_path);
    if !path.exists() {
        error!("File '{}' not found. Skipping...", file_path);
        return Ok(Vec::new());
    }

    let file = File::open(path)?;
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(file);
    let mut result = Vec::new();

    for record in reader.records() {
        let record = record?;
        for field in record.iter() {
            let candidate = field.trim();
            if !candidate.is_empty() {
                result.push(candidate.to_string());
            }
        }
    }

    Ok(result)
}

fn split_input(line: &str) -> Vec<String> {
    line.split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::NamedTempFile;

    #[test]
    fn test_urls_from_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "https://amzn.to/a, https://s.shopee.com.br/b").unwrap();
        writeln!(temp_file, "https://example.com/").unwrap();
        writeln!(temp_file, ",,").unwrap();

        let urls = urls_from_file(temp_file.path().to_str().unwrap()).unwrap();
        assert_eq!(
            urls,
            vec![
                "https://amzn.to/a".to_string(),
                "https://s.shopee.com.br/b".to_string(),
                "https://example.com/".to_string(),
            ]
        );
    }

    #[test]
    fn test_urls_from_missing_file() {
        assert!(urls_from_file("does/not/exist.csv").unwrap().is_empty());
    }

    #[test]
    fn test_source_from_args_and_files() {
        let mut temp_file = NamedTempFile::new().unwrap();
        writeln!(temp_file, "https://www.banggood.com/x").unwrap();

        let source = UrlSource::new(
            &[" https://amzn.to/a ".to_string(), "".to_string()],
            &[temp_file.path().to_str().unwrap().to_string()],
        )
        .unwrap();

        assert_eq!(
            source.urls,
            vec![
                "https://amzn.to/a".to_string(),
                "https://www.banggood.com/x".to_string(),
            ]
        );
    }

    #[test]
    fn test_split_input() {
        assert_eq!(
            split_input(" https://a.com , ,https://b.com"),
            vec!["https://a.com".to_string(), "https://b.com".to_string()]
        );
        assert!(split_input("   ").is_empty());
    }
}
