//! Global constants used throughout the atelier codebase.
//!
//! File names, environment variable names, registry defaults, and the package
//! sets installed during `atelier init` live here so that the values are
//! defined once and discoverable in one place.

/// Name of the persisted project configuration file, written at the project root.
pub const CONFIG_FILE_NAME: &str = "atelier.json";

/// `$schema` value written into newly created configuration files.
pub const SCHEMA_URL: &str = "https://atelier-ui.dev/schema.json";

/// Base URL of the public component registry.
///
/// The registry is served as static JSON from a GitHub branch:
/// `{base}/index.json` lists the components and
/// `{base}/components/{name}.json` holds one manifest each.
pub const DEFAULT_REGISTRY_URL: &str =
    "https://raw.githubusercontent.com/atelier-ui/atelier/main/registry";

/// Environment variable overriding the registry base URL (or local directory).
pub const REGISTRY_URL_ENV: &str = "ATELIER_REGISTRY_URL";

/// Environment variable holding the token used by the authenticated
/// contents-API fallback for private registries.
pub const REGISTRY_TOKEN_ENV: &str = "ATELIER_REGISTRY_TOKEN";

/// Environment variable disabling spinners and progress output.
pub const NO_PROGRESS_ENV: &str = "ATELIER_NO_PROGRESS";

/// Environment variable that makes `atelier init` skip installing the styling
/// packages. Used by CI and the integration test suite, where spawning a
/// JavaScript package manager is neither possible nor desirable.
pub const SKIP_PACKAGE_INSTALL_ENV: &str = "ATELIER_SKIP_PACKAGE_INSTALL";

/// Repository coordinates used by the authenticated fallback when the registry
/// base URL does not match the expected `raw.githubusercontent.com` shape.
pub const DEFAULT_REGISTRY_OWNER: &str = "atelier-ui";
/// See [`DEFAULT_REGISTRY_OWNER`].
pub const DEFAULT_REGISTRY_REPO: &str = "atelier";
/// See [`DEFAULT_REGISTRY_OWNER`].
pub const DEFAULT_REGISTRY_BRANCH: &str = "main";
/// Path of the registry directory inside the repository.
pub const DEFAULT_REGISTRY_PATH: &str = "registry";

/// Default import alias for the components directory.
pub const DEFAULT_COMPONENTS_ALIAS: &str = "@/components";

/// Default import alias for the shared utils file.
pub const DEFAULT_UTILS_ALIAS: &str = "@/lib/utils";

/// Styling toolchain packages installed by `atelier init`.
pub const STYLING_PACKAGES: &[&str] = &[
    "tailwindcss",
    "autoprefixer",
    "postcss",
    "class-variance-authority",
    "clsx",
    "tailwind-merge",
    "@radix-ui/react-slot",
];

/// Additional dev dependencies installed when the project uses TypeScript.
pub const TYPESCRIPT_DEV_PACKAGES: &[&str] = &["@types/react", "@types/react-dom"];
