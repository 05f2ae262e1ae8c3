//! The fixed, ordered list of cleanup sections.
//!
//! Flag gates (`--include-xcode`, `--include-docker`, `--aggressive`) are
//! resolved here when the catalog is built. Tool presence and path existence
//! depend on the machine, so those stay as `When*` actions that the engine
//! resolves while running.

use std::path::PathBuf;

use crate::common::config::{Options, Paths};

/// What to do when a command exits non-zero or cannot be started
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Stop the whole run
    Abort,
    /// Print a warning and carry on
    Tolerate,
}

/// An external command invocation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub description: String,
    pub program: String,
    pub args: Vec<String>,
    pub on_failure: FailurePolicy,
}

impl CommandSpec {
    pub fn new(description: &str, program: impl Into<String>, args: &[&str]) -> Self {
        Self {
            description: description.to_string(),
            program: program.into(),
            args: args.iter().map(|a| a.to_string()).collect(),
            on_failure: FailurePolicy::Abort,
        }
    }

    pub fn tolerate_failure(mut self) -> Self {
        self.on_failure = FailurePolicy::Tolerate;
        self
    }
}

/// One step of a cleanup section
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Measure and delete a path
    Remove { path: PathBuf, label: String },
    /// Invoke an external command
    Run(CommandSpec),
    /// Run `then` only if `tool` is on the search path
    WhenTool {
        tool: String,
        then: Vec<Action>,
        otherwise: Option<String>,
    },
    /// Branch on whether `path` exists
    WhenPath {
        path: PathBuf,
        then: Vec<Action>,
        otherwise: Vec<Action>,
    },
    /// Ask a tool where its cache lives, falling back to a default, then remove it
    RemoveQueried {
        label: String,
        program: String,
        args: Vec<String>,
        fallback: PathBuf,
    },
    /// Remove every entry of `dir` whose name matches `pattern`
    RemoveGlob {
        dir: PathBuf,
        pattern: String,
        label: String,
    },
    /// Informational line
    Note(String),
}

impl Action {
    pub fn remove(path: PathBuf, label: &str) -> Self {
        Action::Remove {
            path,
            label: label.to_string(),
        }
    }

    pub fn run(spec: CommandSpec) -> Self {
        Action::Run(spec)
    }

    pub fn when_tool(tool: &str, then: Vec<Action>) -> Self {
        Action::WhenTool {
            tool: tool.to_string(),
            then,
            otherwise: None,
        }
    }

    pub fn when_tool_else(tool: &str, then: Vec<Action>, otherwise: &str) -> Self {
        Action::WhenTool {
            tool: tool.to_string(),
            then,
            otherwise: Some(otherwise.to_string()),
        }
    }

    pub fn note(text: &str) -> Self {
        Action::Note(text.to_string())
    }
}

/// A titled group of actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub actions: Vec<Action>,
}

impl Section {
    fn new(title: &str, actions: Vec<Action>) -> Self {
        Self {
            title: title.to_string(),
            actions,
        }
    }
}

/// Build the ordered catalog for one run
pub fn catalog(opts: &Options, paths: &Paths) -> Vec<Section> {
    let mut sections = vec![
        gradle_android(paths),
        flutter_dart(opts, paths),
        node(paths),
        cocoapods(paths),
        swiftpm(paths),
        python_ruby(paths),
        homebrew(paths),
        vscode(paths),
    ];

    if opts.include_xcode {
        sections.push(xcode(paths));
    }
    if opts.include_docker {
        sections.push(docker());
    }

    sections
}

fn gradle_android(paths: &Paths) -> Section {
    let wrapper = paths.project_join("android/gradlew");
    let wrapper_program = wrapper.to_string_lossy().into_owned();

    Section::new(
        "Gradle / Android",
        vec![
            Action::WhenPath {
                path: wrapper,
                then: vec![Action::run(
                    CommandSpec::new("Stopping project Gradle daemon", wrapper_program, &["--stop"])
                        .tolerate_failure(),
                )],
                otherwise: vec![Action::when_tool_else(
                    "gradle",
                    vec![Action::run(
                        CommandSpec::new("Stopping Gradle daemons", "gradle", &["--stop"])
                            .tolerate_failure(),
                    )],
                    "gradle not installed, no daemon to stop",
                )],
            },
            Action::when_tool(
                "flutter",
                vec![Action::run(
                    CommandSpec::new("Cleaning Flutter build artifacts", "flutter", &["clean"])
                        .tolerate_failure(),
                )],
            ),
            Action::remove(paths.project_join("build"), "Project build output"),
            Action::remove(paths.project_join(".dart_tool"), "Project .dart_tool"),
            Action::remove(paths.project_join("android/.gradle"), "Project Android .gradle"),
            Action::remove(paths.home_join(".gradle/caches"), "Gradle caches"),
            Action::remove(paths.home_join(".gradle/daemon"), "Gradle daemon logs"),
            Action::remove(paths.home_join(".android/build-cache"), "Android build cache"),
            Action::RemoveGlob {
                dir: paths.home_join("Library/Caches/Google"),
                pattern: "AndroidStudio*".to_string(),
                label: "Android Studio caches".to_string(),
            },
        ],
    )
}

fn flutter_dart(opts: &Options, paths: &Paths) -> Section {
    let mut actions = if opts.aggressive {
        vec![
            Action::remove(paths.home_join(".pub-cache/hosted"), "Pub hosted packages"),
            Action::remove(paths.home_join(".pub-cache/git"), "Pub git packages"),
        ]
    } else {
        vec![Action::note(
            "Keeping ~/.pub-cache (use --aggressive to remove downloaded packages)",
        )]
    };
    actions.push(Action::remove(
        paths.home_join(".dartServer"),
        "Dart analysis server cache",
    ));

    Section::new("Flutter / Dart", actions)
}

fn node(paths: &Paths) -> Section {
    Section::new(
        "Node",
        vec![
            Action::when_tool_else(
                "npm",
                vec![
                    Action::run(CommandSpec::new(
                        "Cleaning npm cache",
                        "npm",
                        &["cache", "clean", "--force"],
                    )),
                    Action::remove(paths.home_join(".npm/_cacache"), "npm cache"),
                ],
                "npm not installed, skipping",
            ),
            Action::when_tool_else(
                "yarn",
                vec![Action::run(CommandSpec::new(
                    "Cleaning yarn cache",
                    "yarn",
                    &["cache", "clean"],
                ))],
                "yarn not installed, skipping",
            ),
            Action::when_tool_else(
                "pnpm",
                vec![Action::run(CommandSpec::new(
                    "Pruning pnpm store",
                    "pnpm",
                    &["store", "prune"],
                ))],
                "pnpm not installed, skipping",
            ),
        ],
    )
}

fn cocoapods(paths: &Paths) -> Section {
    Section::new(
        "CocoaPods",
        vec![Action::when_tool_else(
            "pod",
            vec![
                Action::run(CommandSpec::new(
                    "Cleaning CocoaPods cache",
                    "pod",
                    &["cache", "clean", "--all"],
                )),
                Action::remove(paths.home_join("Library/Caches/CocoaPods"), "CocoaPods cache"),
                Action::remove(paths.home_join(".cocoapods/repos/trunk"), "CocoaPods trunk specs"),
            ],
            "CocoaPods not installed, skipping",
        )],
    )
}

fn swiftpm(paths: &Paths) -> Section {
    Section::new(
        "Swift Package Manager",
        vec![
            Action::remove(paths.home_join("Library/Caches/org.swift.swiftpm"), "SwiftPM cache"),
            Action::remove(paths.home_join("Library/org.swift.swiftpm"), "SwiftPM data"),
        ],
    )
}

fn python_ruby(paths: &Paths) -> Section {
    Section::new(
        "Python / Ruby",
        vec![
            Action::when_tool(
                "pip3",
                vec![Action::run(CommandSpec::new(
                    "Purging pip cache",
                    "pip3",
                    &["cache", "purge"],
                ))],
            ),
            Action::remove(paths.home_join("Library/Caches/pip"), "pip cache"),
            Action::remove(paths.home_join("Library/Caches/pypoetry"), "Poetry cache"),
            Action::remove(paths.home_join(".gem/cache"), "RubyGems cache"),
            Action::when_tool(
                "gem",
                vec![Action::run(
                    CommandSpec::new("Removing old gem versions", "gem", &["cleanup"])
                        .tolerate_failure(),
                )],
            ),
        ],
    )
}

fn homebrew(paths: &Paths) -> Section {
    Section::new(
        "Homebrew",
        vec![Action::when_tool_else(
            "brew",
            vec![
                Action::run(CommandSpec::new(
                    "Cleaning Homebrew",
                    "brew",
                    &["cleanup", "--prune=all"],
                )),
                Action::RemoveQueried {
                    label: "Homebrew download cache".to_string(),
                    program: "brew".to_string(),
                    args: vec!["--cache".to_string()],
                    fallback: paths.home_join("Library/Caches/Homebrew"),
                },
            ],
            "Homebrew not installed, skipping",
        )],
    )
}

fn vscode(paths: &Paths) -> Section {
    let code = paths.home_join("Library/Application Support/Code");
    Section::new(
        "VS Code",
        vec![
            Action::remove(code.join("Cache"), "VS Code cache"),
            Action::remove(code.join("CachedData"), "VS Code cached data"),
            Action::remove(code.join("CachedExtensionVSIXs"), "VS Code extension downloads"),
            Action::remove(code.join("logs"), "VS Code logs"),
        ],
    )
}

// Simulator devices themselves (CoreSimulator/Devices) are never listed here.
fn xcode(paths: &Paths) -> Section {
    let developer = paths.home_join("Library/Developer");
    Section::new(
        "Xcode",
        vec![
            Action::remove(developer.join("Xcode/DerivedData"), "Xcode DerivedData"),
            Action::remove(developer.join("Xcode/Archives"), "Xcode Archives"),
            Action::remove(developer.join("Xcode/iOS DeviceSupport"), "iOS DeviceSupport"),
            Action::run(CommandSpec::new(
                "Deleting unavailable simulators",
                "xcrun",
                &["simctl", "delete", "unavailable"],
            )),
            Action::remove(developer.join("CoreSimulator/Caches"), "CoreSimulator caches"),
            Action::remove(paths.home_join("Library/Caches/com.apple.dt.Xcode"), "Xcode cache"),
        ],
    )
}

// Only unused data is pruned; no --all or --volumes.
fn docker() -> Section {
    Section::new(
        "Docker",
        vec![Action::when_tool_else(
            "docker",
            vec![
                Action::run(CommandSpec::new(
                    "Pruning unused Docker data",
                    "docker",
                    &["system", "prune", "-f"],
                )),
                Action::run(CommandSpec::new(
                    "Pruning Docker build cache",
                    "docker",
                    &["builder", "prune", "-f"],
                )),
            ],
            "Docker not installed, skipping",
        )],
    )
}
