//! Registry of the evaluation sites.
//!
//! Each site has one workbook of paired observed/modeled readings. Order here
//! is the order statistics are written in.

use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Site {
    /// Three-letter code used in statistic keys
    pub code: &'static str,
    pub name: &'static str,
    pub file_name: &'static str,
}

impl Site {
    pub fn workbook_path(&self, data_dir: impl AsRef<Path>) -> PathBuf {
        data_dir.as_ref().join(self.file_name)
    }
}

pub const SITE_REGISTRY: &[Site] = &[
    Site {
        code: "bei",
        name: "Beijing",
        file_name: "Beijing.xlsx",
    },
    Site {
        code: "che",
        name: "Chengdu",
        file_name: "Chengdu.xlsx",
    },
    Site {
        code: "lan",
        name: "Langtang",
        file_name: "Langtang.xlsx",
    },
    Site {
        code: "new",
        name: "New Delhi",
        file_name: "New_Delhi.xlsx",
    },
    Site {
        code: "kar",
        name: "Karachi",
        file_name: "Pakistan_karachi.xlsx",
    },
    Site {
        code: "uzb",
        name: "Uzbekistan",
        file_name: "Uzbekistan.xlsx",
    },
];

/// Look up a site by its code (case-insensitive)
pub fn find_site(code: &str) -> Option<&'static Site> {
    let code = code.trim();
    SITE_REGISTRY
        .iter()
        .find(|s| s.code.eq_ignore_ascii_case(code))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_registry_has_six_unique_sites() {
        assert_eq!(SITE_REGISTRY.len(), 6);
        let mut codes: Vec<&str> = SITE_REGISTRY.iter().map(|s| s.code).collect();
        codes.sort_unstable();
        codes.dedup();
        assert_eq!(codes.len(), 6);
    }

    #[test]
    fn test_find_site() {
        assert_eq!(find_site("kar").unwrap().file_name, "Pakistan_karachi.xlsx");
        assert_eq!(find_site(" NEW ").unwrap().name, "New Delhi");
        assert!(find_site("xyz").is_none());
    }

    #[test]
    fn test_workbook_path() {
        let site = find_site("bei").unwrap();
        assert_eq!(
            site.workbook_path("/data"),
            PathBuf::from("/data/Beijing.xlsx")
        );
    }
}
