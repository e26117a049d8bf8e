//! Audit plan — the static configuration that drives every check.
//!
//! All lists that were conceptually "the rules" (module-to-file mappings,
//! required subsection markers, banned phrases) live in one `Plan` value
//! built at startup and passed by reference into each check, so the checker
//! runs unmodified against synthetic fixture trees.

use regex::Regex;

/// Which declaration a module spec extracts methods from.
#[derive(Debug)]
pub enum DeclTarget {
    /// Every method signature declared directly on the named interface.
    Interface(&'static str),
    /// A single named method on the named class. Other methods on the class
    /// are out of documentation scope.
    Class {
        name: &'static str,
        method: &'static str,
    },
}

/// Binds one SDK source file to the declaration and doc prefix it is
/// audited under.
#[derive(Debug)]
pub struct ModuleSpec {
    /// Source file path, relative to the SDK repository root.
    pub file: &'static str,
    pub target: DeclTarget,
    /// Prefix qualifying documented method names, e.g. `sessions`.
    pub prefix: &'static str,
}

/// Full audit plan for one documentation repository.
pub struct Plan {
    pub module_specs: Vec<ModuleSpec>,
    /// Method reference pages, relative to the docs root. Duplicate headings
    /// across these files are a violation.
    pub method_doc_files: Vec<&'static str>,
    pub hub_file: &'static str,
    pub quickstart_file: &'static str,
    pub errors_file: &'static str,
    pub interfaces_file: &'static str,
    pub troubleshooting_file: &'static str,
    /// Subsection markers every documented method section must contain.
    pub required_method_sections: Vec<&'static str>,
    pub required_quickstart_headings: Vec<&'static str>,
    pub required_error_classes: Vec<&'static str>,
    pub required_hub_links: Vec<&'static str>,
    /// Exact request-fields table header row.
    pub request_table_header: &'static str,
    /// Exact response-fields table header row.
    pub response_table_header: &'static str,
    /// Case-insensitive phrases that must not appear in published pages.
    pub banned_patterns: Vec<Regex>,
}

impl Plan {
    /// The audit plan for the React Native SDK documentation set.
    pub fn react_native_sdk() -> Self {
        let module = |file, iface, prefix| ModuleSpec {
            file,
            target: DeclTarget::Interface(iface),
            prefix,
        };

        Plan {
            module_specs: vec![
                module(
                    "packages/sdk-core/src/modules/sessions.ts",
                    "SessionsModule",
                    "sessions",
                ),
                module(
                    "packages/sdk-core/src/modules/drive.ts",
                    "DriveModule",
                    "drive",
                ),
                module(
                    "packages/sdk-core/src/modules/sharing.ts",
                    "SharingModule",
                    "sharing",
                ),
                module("packages/sdk-core/src/modules/bin.ts", "BinModule", "bin"),
                module(
                    "packages/sdk-core/src/modules/photo-backup.ts",
                    "PhotoBackupModule",
                    "photoBackup",
                ),
                module(
                    "packages/sdk-core/src/modules/storage.ts",
                    "StorageModule",
                    "storage",
                ),
                ModuleSpec {
                    file: "packages/react-native-sdk/src/upload-manager.ts",
                    target: DeclTarget::Class {
                        name: "ReactNativePhotoBackupUploadManager",
                        method: "backupAsset",
                    },
                    prefix: "photoBackupUploadManager",
                },
            ],
            method_doc_files: vec![
                "docs/rn-methods-sessions.md",
                "docs/rn-methods-drive.md",
                "docs/rn-methods-sharing.md",
                "docs/rn-methods-bin.md",
                "docs/rn-methods-photo-backup.md",
                "docs/rn-methods-storage.md",
                "docs/rn-methods-upload-manager.md",
            ],
            hub_file: "docs/rn-sdk-methods-reference.md",
            quickstart_file: "docs/quickstart-react-native.md",
            errors_file: "docs/error-retry-matrix.md",
            interfaces_file: "docs/rn-interfaces.md",
            troubleshooting_file: "docs/rn-troubleshooting.md",
            required_method_sections: vec![
                "#### What this method does",
                "#### When to call it",
                "#### Signature",
                "#### Request fields",
                "#### Response fields",
                "#### Errors and handling",
                "#### Minimal example",
            ],
            required_quickstart_headings: vec![
                "## 1) Install",
                "## 2) Configure",
                "## 3) Initialize",
                "## 4) Verify",
                "## 5) Next steps",
            ],
            required_error_classes: vec![
                "AuthExchangeError",
                "AuthError",
                "ValidationError",
                "ConflictError",
                "NotFoundError",
                "RateLimitError",
                "NetworkError",
                "SdkError",
            ],
            required_hub_links: vec![
                "/docs/rn-methods-sessions",
                "/docs/rn-methods-drive",
                "/docs/rn-methods-sharing",
                "/docs/rn-methods-bin",
                "/docs/rn-methods-photo-backup",
                "/docs/rn-methods-storage",
                "/docs/rn-methods-upload-manager",
            ],
            request_table_header: "| Field | Type | Required | Default | Format/Constraints | Meaning |",
            response_table_header: "| Field | Type | Required/Conditional | Format/Constraints | Meaning |",
            banned_patterns: vec![
                Regex::new(r"(?i)\bbackend\b").unwrap(),
                Regex::new(r"(?i)\bendpoint\b").unwrap(),
                Regex::new(r"(?i)implementation-defined").unwrap(),
                Regex::new(r"(?i)implementation-specific").unwrap(),
                Regex::new(r"(?i)intentionally documented as sdk-opaque").unwrap(),
            ],
        }
    }

    /// Pages that must carry `## Prerequisites` and a subtitle sentence.
    pub fn pages_requiring_prereqs(&self) -> Vec<&'static str> {
        let mut pages = vec![self.quickstart_file, self.interfaces_file, self.hub_file];
        pages.extend(&self.method_doc_files);
        pages.push(self.errors_file);
        pages.push(self.troubleshooting_file);
        pages
    }

    /// Pages scanned for banned terminology.
    pub fn language_files(&self) -> Vec<&'static str> {
        let mut pages = vec![
            self.hub_file,
            self.quickstart_file,
            self.interfaces_file,
            self.errors_file,
        ];
        pages.extend(&self.method_doc_files);
        pages.push(self.troubleshooting_file);
        pages
    }

    /// Pages whose absence is reported before any content check runs.
    pub fn required_doc_files(&self) -> Vec<&'static str> {
        let mut pages = vec![self.hub_file, self.quickstart_file, self.errors_file];
        pages.extend(&self.method_doc_files);
        pages
    }
}
