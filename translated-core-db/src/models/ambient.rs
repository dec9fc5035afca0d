//! Thread-local locale context for callers that want ambient ergonomics at their boundary.
//!
//! Nothing in this crate reads the ambient context implicitly: resolution and validation
//! always take a `LocaleContext` argument. A request handler can install a context once
//! and pass `ambient::get()` down, or scope a temporary locale with [`with_locale`].

use std::cell::RefCell;

use translated_core_api::{ApiResult, Locale, TranslationError};

use super::locale_context::LocaleContext;

thread_local! {
    static AMBIENT: RefCell<Option<LocaleContext>> = const { RefCell::new(None) };
}

/// Install the context for the current thread, returning the previous one.
pub fn set(ctx: LocaleContext) -> Option<LocaleContext> {
    AMBIENT.with(|cell| cell.borrow_mut().replace(ctx))
}

pub fn clear() -> Option<LocaleContext> {
    AMBIENT.with(|cell| cell.borrow_mut().take())
}

/// Snapshot of the current thread's context.
pub fn get() -> ApiResult<LocaleContext> {
    AMBIENT
        .with(|cell| cell.borrow().clone())
        .ok_or_else(|| TranslationError::Configuration("no ambient locale context installed".to_string()))
}

/// Run `f` with the ambient current locale switched to `locale`.
///
/// The previous current locale is restored afterwards, also when `f` panics.
pub fn with_locale<R>(locale: Locale, f: impl FnOnce(&LocaleContext) -> R) -> ApiResult<R> {
    let mut scoped = get()?;
    let previous = scoped.current().clone();
    scoped.set_current(locale);
    set(scoped.clone());

    struct Restore(Locale);
    impl Drop for Restore {
        fn drop(&mut self) {
            AMBIENT.with(|cell| {
                if let Some(ctx) = cell.borrow_mut().as_mut() {
                    ctx.set_current(self.0.clone());
                }
            });
        }
    }
    let _restore = Restore(previous);

    Ok(f(&scoped))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_without_context_fails() {
        clear();
        assert!(matches!(get(), Err(TranslationError::Configuration(_))));
    }

    #[test]
    fn test_with_locale_restores_previous_locale() {
        set(LocaleContext::parse("en", &["en", "lv"]).unwrap());

        let lv = Locale::new("lv").unwrap();
        let seen = with_locale(lv.clone(), |ctx| ctx.current().clone()).unwrap();
        assert_eq!(seen, lv);
        assert_eq!(get().unwrap().current(), &Locale::new("en").unwrap());

        clear();
    }

    #[test]
    fn test_context_is_thread_local() {
        set(LocaleContext::parse("en", &["en"]).unwrap());

        let other_thread = std::thread::spawn(|| get().is_err()).join().unwrap();
        assert!(other_thread);

        clear();
    }
}
