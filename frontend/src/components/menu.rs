//! Menu with a shared selection context.
//!
//! [`Menu`] provides a [`MenuContext`] to its subtree; every [`MenuItem`]
//! below it reads the active index from there and selects through it.
//! Two menus on the same page each get their own context.

use leptos::*;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MenuMode {
    #[default]
    Horizontal,
    Vertical,
}

impl MenuMode {
    pub fn css_class(self) -> &'static str {
        match self {
            MenuMode::Horizontal => "menu-horizontal",
            MenuMode::Vertical => "menu-vertical",
        }
    }
}

/// Selected index plus the select action, scoped to one [`Menu`].
#[derive(Clone, Copy)]
pub struct MenuContext {
    active: RwSignal<usize>,
    on_select: Option<Callback<usize>>,
}

impl MenuContext {
    pub fn new(default_index: usize, on_select: Option<Callback<usize>>) -> Self {
        Self {
            active: create_rw_signal(default_index),
            on_select,
        }
    }

    pub fn active(&self) -> usize {
        self.active.get()
    }

    pub fn is_active(&self, index: usize) -> bool {
        self.active.get() == index
    }

    pub fn select(&self, index: usize) {
        self.active.set(index);
        if let Some(cb) = self.on_select {
            cb.call(index);
        }
    }
}

fn join_classes(base: &str, extra: Option<&str>) -> String {
    match extra {
        Some(extra) if !extra.is_empty() => format!("{} {}", base, extra),
        _ => base.to_string(),
    }
}

#[component]
pub fn Menu(
    #[prop(optional)] default_index: usize,
    #[prop(optional)] mode: MenuMode,
    #[prop(optional, into)] on_select: Option<Callback<usize>>,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    provide_context(MenuContext::new(default_index, on_select));

    let classes = join_classes(&format!("menu {}", mode.css_class()), class.as_deref());
    view! {
        <ul class=classes data-testid="menu">
            {children()}
        </ul>
    }
}

#[component]
pub fn MenuItem(
    index: usize,
    #[prop(optional)] disabled: bool,
    #[prop(optional, into)] class: Option<String>,
    children: Children,
) -> impl IntoView {
    let context = use_context::<MenuContext>();
    if context.is_none() {
        log::warn!("MenuItem {} rendered outside of a Menu", index);
    }

    let is_active = move || context.map(|c| c.is_active(index)).unwrap_or(false);
    let on_click = move |_| {
        if disabled {
            return;
        }
        if let Some(c) = context {
            c.select(index);
        }
    };

    view! {
        <li
            class=join_classes("menu-item", class.as_deref())
            class:is-active=is_active
            class:is-disabled=disabled
            on:click=on_click
        >
            {children()}
        </li>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_default_index_is_active() {
        let runtime = create_runtime();
        let ctx = MenuContext::new(1, None);
        assert_eq!(ctx.active(), 1);
        assert!(ctx.is_active(1));
        assert!(!ctx.is_active(0));
        runtime.dispose();
    }

    #[test]
    fn test_select_updates_and_notifies() {
        let runtime = create_runtime();
        let picked = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&picked);
        let ctx = MenuContext::new(0, Some(Callback::new(move |i: usize| sink.borrow_mut().push(i))));

        ctx.select(2);
        ctx.select(3);
        assert!(ctx.is_active(3));
        assert!(!ctx.is_active(2));
        assert_eq!(*picked.borrow(), vec![2, 3]);
        runtime.dispose();
    }

    #[test]
    fn test_contexts_are_independent() {
        let runtime = create_runtime();
        let top = MenuContext::new(0, None);
        let side = MenuContext::new(0, None);
        top.select(4);
        assert!(top.is_active(4));
        assert!(side.is_active(0));
        runtime.dispose();
    }

    #[test]
    fn test_class_joining() {
        assert_eq!(join_classes("menu-item", None), "menu-item");
        assert_eq!(join_classes("menu-item", Some("")), "menu-item");
        assert_eq!(join_classes("menu-item", Some("nav")), "menu-item nav");
        assert_eq!(
            join_classes(&format!("menu {}", MenuMode::Vertical.css_class()), Some("side")),
            "menu menu-vertical side"
        );
    }
}
