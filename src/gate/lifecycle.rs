use std::cell::RefCell;
use std::rc::{Rc, Weak};

use super::{FlagQuery, Resolution};
use crate::evaluation::resolve_flag;
use crate::source::CookieSource;

/// Where a gate's cookie text comes from, fixed at mount.
enum Mode {
    Server { header: String },
    Client { ambient: Option<Rc<dyn CookieSource>> },
}

/// Resolution state shared with in-flight deferred tasks. The generation
/// counter is the cancellation token: it moves every time the flag name
/// changes in client mode, and a task only applies its result while the
/// generation it captured is still current.
struct Shared {
    resolution: Resolution,
    generation: u64,
}

/// Gates a piece of content behind a feature-flag cookie.
///
/// Mounted with a captured `Cookie` header ([`FlagQuery::server`]), the gate
/// resolves synchronously during the mounting pass and [`render`] is final
/// from the first call — the SSR fast-path, usable on any runtime or none.
///
/// Mounted without one ([`FlagQuery::client`]), the gate renders nothing
/// first, schedules a one-shot task that reads the ambient cookie source,
/// and renders the decided output from then on. The nothing-first window is
/// deliberate: content enabled by the flag appears late rather than ever
/// being shown and retracted.
///
/// [`render`]: FlagGate::render
pub struct FlagGate<T> {
    flag_name: String,
    content: T,
    mode: Mode,
    shared: Rc<RefCell<Shared>>,
}

impl<T> FlagGate<T> {
    /// Create the gate and run its first resolution pass.
    ///
    /// The mode is fixed here by `query.server_cookie_text` presence alone
    /// (the empty string still selects server mode) and never changes for
    /// the life of this instance. `ambient` is only ever consulted in
    /// client mode; server mounts may pass `None`.
    ///
    /// Client-mode mounts schedule onto the current thread's
    /// [`tokio::task::LocalSet`] and must happen inside one:
    ///
    /// ```no_run
    /// use feature_flag_gate::{FlagGate, FlagQuery, SharedCookieSource};
    ///
    /// # async fn hydrate() {
    /// let local = tokio::task::LocalSet::new();
    /// local
    ///     .run_until(async {
    ///         let jar = SharedCookieSource::with_cookies("beta-banner=on");
    ///         let gate = FlagGate::mount(
    ///             FlagQuery::client("beta-banner"),
    ///             "<banner>",
    ///             Some(jar.handle()),
    ///         );
    ///
    ///         assert_eq!(gate.render(), None); // hydration pass: nothing yet
    ///         tokio::task::yield_now().await;
    ///         assert_eq!(gate.render(), Some(&"<banner>"));
    ///     })
    ///     .await;
    /// # }
    /// ```
    pub fn mount(query: FlagQuery, content: T, ambient: Option<Rc<dyn CookieSource>>) -> Self {
        let FlagQuery {
            flag_name,
            server_cookie_text,
        } = query;

        match server_cookie_text {
            Some(header) => {
                let enabled = resolve_flag(&header, &flag_name);

                FlagGate {
                    flag_name,
                    content,
                    mode: Mode::Server { header },
                    shared: Rc::new(RefCell::new(Shared {
                        resolution: Resolution::ServerResolved { enabled },
                        generation: 0,
                    })),
                }
            }
            None => {
                let gate = FlagGate {
                    flag_name,
                    content,
                    mode: Mode::Client { ambient },
                    shared: Rc::new(RefCell::new(Shared {
                        resolution: Resolution::Unresolved,
                        generation: 0,
                    })),
                };
                gate.schedule_resolution();
                gate
            }
        }
    }

    /// Re-evaluate the gate with fresh inputs, as a host does on re-render.
    ///
    /// Content is replaced unconditionally. A flag-name change re-resolves:
    /// synchronously from the captured header in server mode, via a fresh
    /// deferred task in client mode (discarding any earlier client
    /// resolution and any still-pending one).
    ///
    /// Surprising but intentional: `query.server_cookie_text` is only read
    /// at [`mount`]. An update carrying different header text — or
    /// switching between supplying and omitting it — changes nothing; the
    /// mode and the captured header are fixed for the instance's lifetime.
    ///
    /// [`mount`]: FlagGate::mount
    pub fn update(&mut self, query: FlagQuery, content: T) {
        self.content = content;

        if query.flag_name == self.flag_name {
            return;
        }
        self.flag_name = query.flag_name;

        match &self.mode {
            Mode::Server { header } => {
                let enabled = resolve_flag(header, &self.flag_name);
                self.shared.borrow_mut().resolution = Resolution::ServerResolved { enabled };
            }
            Mode::Client { .. } => {
                {
                    let mut shared = self.shared.borrow_mut();
                    shared.generation += 1;
                    shared.resolution = Resolution::Unresolved;
                }
                self.schedule_resolution();
            }
        }
    }

    /// The render decision for the current state: the content when the flag
    /// resolved enabled, nothing while unresolved or disabled.
    pub fn render(&self) -> Option<&T> {
        self.resolution().is_enabled().then_some(&self.content)
    }

    /// Current resolution state
    pub fn resolution(&self) -> Resolution {
        self.shared.borrow().resolution
    }

    /// The decision, once one exists; `None` while a client-mode gate is
    /// still waiting on its deferred read.
    pub fn enabled(&self) -> Option<bool> {
        self.resolution().enabled()
    }

    /// The flag name this gate currently resolves
    pub fn flag_name(&self) -> &str {
        &self.flag_name
    }

    fn schedule_resolution(&self) {
        let Mode::Client { ambient } = &self.mode else {
            return;
        };

        let ambient = ambient.clone();
        let flag_name = self.flag_name.clone();
        let shared = Rc::downgrade(&self.shared);
        let generation = self.shared.borrow().generation;

        tokio::task::spawn_local(async move {
            resolve_deferred(&shared, ambient.as_deref(), &flag_name, generation);
        });
    }
}

/// Runs on the next tick of the host scheduler: reads the ambient source
/// and applies the decision, unless the gate is gone or the flag name has
/// moved on since this task was scheduled.
fn resolve_deferred(
    shared: &Weak<RefCell<Shared>>,
    ambient: Option<&dyn CookieSource>,
    flag_name: &str,
    generation: u64,
) {
    let Some(shared) = shared.upgrade() else {
        return; // gate dropped while this task was queued
    };
    if shared.borrow().generation != generation {
        return; // flag name changed while this task was queued
    }

    let raw = ambient.and_then(|source| source.read()).unwrap_or_default();
    let enabled = resolve_flag(&raw, flag_name);

    let mut shared = shared.borrow_mut();
    if shared.generation == generation {
        shared.resolution = Resolution::ClientResolved { enabled };
    }
}
