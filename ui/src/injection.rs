//! Mounting components next to anchor nodes the host page keeps recreating.
//!
//! The registry is DOM-agnostic: a sweep asks an [`AnchorDom`] for the
//! current anchors and mounts a fresh component instance after every anchor
//! that does not already carry one. Sweeps are idempotent, so they can be
//! run on every DOM mutation.

use dioxus_logger::tracing::{info, warn};
use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum InjectionError {
    #[error("no document available")]
    NoDocument,
    #[error("invalid anchor selector `{0}`")]
    InvalidSelector(String),
    #[error("failed to insert mount point: {0}")]
    Insert(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::EnumIs)]
pub enum InjectionMode {
    /// Mount after the first matching anchor, then stop.
    Once,
    /// Re-mount every time a matching anchor appears.
    Continuous,
}

/// What gets mounted in the browser: a Dioxus root component.
pub type Component = fn() -> dioxus::prelude::Element;

/// Identifies one mounted component instance. Instances never share state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct InstanceId(pub u64);

/// The DOM operations a sweep needs.
pub trait AnchorDom<C> {
    type Anchor;

    fn query_all(&self, selector: &str) -> Result<Vec<Self::Anchor>, InjectionError>;
    /// Whether a component is already mounted after `anchor`.
    fn is_mounted(&self, anchor: &Self::Anchor) -> bool;
    fn mount_after(
        &mut self,
        anchor: &Self::Anchor,
        component: &C,
        instance: InstanceId,
    ) -> Result<(), InjectionError>;
}

struct Injection<C> {
    selector: String,
    mode: InjectionMode,
    component: C,
    mounted: usize,
}

impl<C> Injection<C> {
    fn is_finished(&self) -> bool {
        self.mode.is_once() && self.mounted > 0
    }
}

pub struct InjectionRegistry<C> {
    injections: Vec<Injection<C>>,
    next_instance: u64,
}

impl<C> Default for InjectionRegistry<C> {
    fn default() -> Self {
        Self {
            injections: Vec::new(),
            next_instance: 0,
        }
    }
}

impl<C> InjectionRegistry<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_injection(&mut self, selector: impl Into<String>, mode: InjectionMode, component: C) {
        self.injections.push(Injection {
            selector: selector.into(),
            mode,
            component,
            mounted: 0,
        });
    }

    pub fn register_continuous_injection(&mut self, selector: impl Into<String>, component: C) {
        self.register_injection(selector, InjectionMode::Continuous, component);
    }

    pub fn len(&self) -> usize {
        self.injections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.injections.is_empty()
    }

    /// Mounts a component after every unmounted anchor. Returns the number of
    /// new instances.
    ///
    /// A failing selector or mount is logged and skipped; the other
    /// registrations still run.
    pub fn sweep<D: AnchorDom<C>>(&mut self, dom: &mut D) -> usize {
        let mut mounted = 0;

        for injection in &mut self.injections {
            if injection.is_finished() {
                continue;
            }

            let anchors = match dom.query_all(&injection.selector) {
                Ok(anchors) => anchors,
                Err(e) => {
                    warn!("skipping anchor `{}`: {}", injection.selector, e);
                    continue;
                }
            };

            let fresh: Vec<_> = anchors.into_iter().filter(|a| !dom.is_mounted(a)).collect();

            for anchor in &fresh {
                let instance = InstanceId(self.next_instance);
                self.next_instance += 1;

                match dom.mount_after(anchor, &injection.component, instance) {
                    Ok(()) => {
                        info!("mounted instance {} after `{}`", instance.0, injection.selector);
                        injection.mounted += 1;
                        mounted += 1;
                    }
                    Err(e) => warn!("mount after `{}` failed: {}", injection.selector, e),
                }

                if injection.is_finished() {
                    break;
                }
            }
        }

        mounted
    }
}

/// Browser glue: a MutationObserver re-runs the sweep whenever the page
/// changes, and each mount point gets its own Dioxus root.
#[cfg(target_arch = "wasm32")]
pub mod web {
    use super::{AnchorDom, Component, InjectionError, InjectionRegistry, InstanceId};
    use dioxus::prelude::*;
    use dioxus_logger::tracing::{debug, error};
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::closure::Closure;
    use wasm_bindgen::JsCast;
    use web_sys::{Document, Element as DomElement, MutationObserver, MutationObserverInit};

    /// Marks the element a component was mounted into.
    const MOUNT_ATTRIBUTE: &str = "data-float-mount";

    pub struct WebDom {
        document: Document,
    }

    fn js_err(e: wasm_bindgen::JsValue) -> String {
        e.as_string().unwrap_or_else(|| format!("{e:?}"))
    }

    impl AnchorDom<Component> for WebDom {
        type Anchor = DomElement;

        fn query_all(&self, selector: &str) -> Result<Vec<DomElement>, InjectionError> {
            let nodes = self
                .document
                .query_selector_all(selector)
                .map_err(|_| InjectionError::InvalidSelector(selector.to_string()))?;

            Ok((0..nodes.length())
                .filter_map(|i| nodes.item(i))
                .filter_map(|n| n.dyn_into::<DomElement>().ok())
                .collect())
        }

        fn is_mounted(&self, anchor: &DomElement) -> bool {
            anchor
                .next_element_sibling()
                .is_some_and(|e| e.has_attribute(MOUNT_ATTRIBUTE))
        }

        fn mount_after(
            &mut self,
            anchor: &DomElement,
            component: &Component,
            instance: InstanceId,
        ) -> Result<(), InjectionError> {
            let root_id = format!("float-mount-{}", instance.0);
            let root = self
                .document
                .create_element("div")
                .map_err(|e| InjectionError::Insert(js_err(e)))?;
            root.set_id(&root_id);
            root.set_attribute(MOUNT_ATTRIBUTE, &instance.0.to_string())
                .map_err(|e| InjectionError::Insert(js_err(e)))?;
            anchor
                .after_with_node_1(&root)
                .map_err(|e| InjectionError::Insert(js_err(e)))?;

            let vdom = VirtualDom::new(*component);
            let config = dioxus_web::Config::new().rootname(root_id);
            crate::compat::spawn_local(async move {
                dioxus_web::run(vdom, config).await;
            });
            Ok(())
        }
    }

    /// Sweeps once, then again after every DOM mutation under `<body>`.
    pub fn start(registry: InjectionRegistry<Component>) -> Result<(), InjectionError> {
        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or(InjectionError::NoDocument)?;
        let body = document.body().ok_or(InjectionError::NoDocument)?;

        let registry = Rc::new(RefCell::new(registry));
        let dom = Rc::new(RefCell::new(WebDom { document }));

        let initial = registry.borrow_mut().sweep(&mut *dom.borrow_mut());
        debug!("initial sweep mounted {} instance(s)", initial);

        let on_mutation = Closure::<dyn FnMut(js_sys::Array, MutationObserver)>::new(
            move |_records: js_sys::Array, _observer: MutationObserver| {
                // Mounting mutates the DOM too; a nested callback finds the
                // registry busy and leaves the work to this sweep.
                let (Ok(mut registry), Ok(mut dom)) = (registry.try_borrow_mut(), dom.try_borrow_mut())
                else {
                    return;
                };
                registry.sweep(&mut *dom);
            },
        );

        let observer = MutationObserver::new(on_mutation.as_ref().unchecked_ref())
            .map_err(|e| InjectionError::Insert(js_err(e)))?;
        let init = MutationObserverInit::new();
        init.set_child_list(true);
        init.set_subtree(true);
        if let Err(e) = observer.observe_with_options(&body, &init) {
            let msg = js_err(e);
            error!("could not observe page: {}", msg);
            return Err(InjectionError::Insert(msg));
        }

        // Both live for the rest of the page's lifetime.
        on_mutation.forget();
        std::mem::forget(observer);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Anchors are (selector, node id) pairs; mounts are recorded per node.
    #[derive(Default)]
    struct FakeDom {
        anchors: Vec<(&'static str, u32)>,
        mounts: HashMap<u32, (&'static str, InstanceId)>,
        mount_calls: usize,
        broken: Option<&'static str>,
    }

    impl FakeDom {
        /// The host re-renders: old nodes and their mounts disappear.
        fn replace(&mut self, selector: &'static str, old: u32, new: u32) {
            self.mounts.remove(&old);
            for anchor in &mut self.anchors {
                if *anchor == (selector, old) {
                    anchor.1 = new;
                }
            }
        }
    }

    impl AnchorDom<&'static str> for FakeDom {
        type Anchor = u32;

        fn query_all(&self, selector: &str) -> Result<Vec<u32>, InjectionError> {
            if self.broken == Some(selector) {
                return Err(InjectionError::InvalidSelector(selector.to_string()));
            }
            Ok(self
                .anchors
                .iter()
                .filter(|(s, _)| *s == selector)
                .map(|(_, id)| *id)
                .collect())
        }

        fn is_mounted(&self, anchor: &u32) -> bool {
            self.mounts.contains_key(anchor)
        }

        fn mount_after(
            &mut self,
            anchor: &u32,
            component: &&'static str,
            instance: InstanceId,
        ) -> Result<(), InjectionError> {
            self.mounts.insert(*anchor, (*component, instance));
            self.mount_calls += 1;
            Ok(())
        }
    }

    #[test]
    fn continuous_remounts_recreated_anchors() {
        let mut dom = FakeDom {
            anchors: vec![("#iteminfo0", 1), ("#iteminfo1", 2)],
            ..Default::default()
        };
        let mut registry = InjectionRegistry::new();
        registry.register_continuous_injection("#iteminfo0", "info");
        registry.register_continuous_injection("#iteminfo1", "info");

        assert_eq!(registry.sweep(&mut dom), 2);
        assert_eq!(registry.sweep(&mut dom), 0);

        dom.replace("#iteminfo0", 1, 3);
        assert_eq!(registry.sweep(&mut dom), 1);
        assert_eq!(dom.mounts[&3], ("info", InstanceId(2)));
        assert_eq!(dom.mounts[&2], ("info", InstanceId(1)));
    }

    #[test]
    fn once_mode_mounts_a_single_instance() {
        let mut dom = FakeDom {
            anchors: vec![("#a", 1), ("#a", 2)],
            ..Default::default()
        };
        let mut registry = InjectionRegistry::new();
        registry.register_injection("#a", InjectionMode::Once, "banner");

        assert_eq!(registry.sweep(&mut dom), 1);
        assert_eq!(dom.mount_calls, 1);

        // The host drops the mounted node; a once-only injection stays gone.
        dom.replace("#a", 1, 5);
        assert_eq!(registry.sweep(&mut dom), 0);
        assert_eq!(dom.mount_calls, 1);
        assert!(dom.mounts.is_empty());
        assert!(!dom.mounts.contains_key(&5));
    }

    #[test]
    fn bad_selector_does_not_block_others() {
        let mut dom = FakeDom {
            anchors: vec![("#ok", 1)],
            broken: Some("#bad"),
            ..Default::default()
        };
        let mut registry = InjectionRegistry::new();
        registry.register_continuous_injection("#bad", "x");
        registry.register_continuous_injection("#ok", "y");

        assert_eq!(registry.len(), 2);
        assert_eq!(registry.sweep(&mut dom), 1);
        assert_eq!(dom.mounts[&1].0, "y");
    }

    #[test]
    fn registry_accepts_dioxus_components() {
        let mut registry: InjectionRegistry<Component> = InjectionRegistry::new();
        for anchor in crate::ITEM_INFO_ANCHORS {
            registry.register_continuous_injection(anchor, crate::SelectedItemInfo);
        }
        assert_eq!(registry.len(), 2);
    }
}
