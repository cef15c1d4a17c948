use std::cell::RefCell;
use std::rc::Rc;

/// Read access to the host's ambient cookie jar, the `document.cookie`
/// analog a client-mode gate consults when its deferred task runs.
///
/// `read` returns the current raw cookie text, or `None` when the host has
/// no jar at hand; the gate treats `None` the same as an empty string. The
/// gate reads exactly once per resolution.
pub trait CookieSource {
    fn read(&self) -> Option<String>;
}

/// Any closure producing the cookie text serves as a source
impl<F> CookieSource for F
where
    F: Fn() -> Option<String>,
{
    fn read(&self) -> Option<String> {
        self()
    }
}

/// An interior-mutable cookie jar for hosts and tests.
///
/// The jar is owned by whoever drives the gates; [`handle`] hands out
/// cloneable read-side references to pass at mount. Cookies set on the jar
/// after a gate mounts are visible to resolutions that run later, matching
/// how an ambient store behaves.
///
/// [`handle`]: SharedCookieSource::handle
#[derive(Debug, Clone, Default)]
pub struct SharedCookieSource {
    cookies: Rc<RefCell<Option<String>>>,
}

impl SharedCookieSource {
    /// An empty jar (reads as no cookies set)
    pub fn new() -> Self {
        Self::default()
    }

    /// A jar pre-filled with the given raw cookie text
    pub fn with_cookies(raw: &str) -> Self {
        let jar = Self::new();
        jar.set_cookies(raw);
        jar
    }

    /// Replace the jar's raw cookie text
    pub fn set_cookies(&self, raw: &str) {
        *self.cookies.borrow_mut() = Some(raw.to_string());
    }

    /// Empty the jar again; subsequent reads see no cookies
    pub fn clear(&self) {
        *self.cookies.borrow_mut() = None;
    }

    /// A read-side reference to this jar, for [`FlagGate::mount`]
    ///
    /// [`FlagGate::mount`]: crate::FlagGate::mount
    pub fn handle(&self) -> Rc<dyn CookieSource> {
        Rc::new(self.clone())
    }
}

impl CookieSource for SharedCookieSource {
    fn read(&self) -> Option<String> {
        self.cookies.borrow().clone()
    }
}
