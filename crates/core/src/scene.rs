use std::cell::{Ref, RefCell, RefMut};
use std::collections::BTreeMap;
use std::rc::Rc;

use resonador_protocol::{Color, Point, Rect, RenderCommand, SharedStr, TextAlign};

use crate::host::{ListenerId, NodeId, OverlayScene, SceneEvent, SceneListener, TextStyle};

#[derive(Debug, Clone)]
enum NodeKind {
    Container {
        position: Point,
        depth: i32,
        scroll_factor: f64,
        children: Vec<NodeId>,
    },
    Rect {
        rect: Rect,
        fill: Color,
    },
    Text {
        position: Point,
        text: SharedStr,
        style: TextStyle,
    },
}

#[derive(Debug, Clone)]
struct Node {
    parent: Option<NodeId>,
    kind: NodeKind,
}

/// Retained display list with a listener registry.
///
/// Terminal and egui hosts keep one of these per screen and turn it into
/// [`RenderCommand`]s every frame. Only containers may be roots; rects and
/// texts must name an existing container as parent.
#[derive(Debug, Default)]
pub struct DisplayScene {
    nodes: BTreeMap<NodeId, Node>,
    roots: Vec<NodeId>,
    listeners: BTreeMap<ListenerId, SceneEvent>,
    next_id: u64,
    scroll: Point,
}

impl DisplayScene {
    pub fn new() -> Self {
        Self::default()
    }

    fn alloc(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }

    /// Camera scroll applied to containers in proportion to their scroll
    /// factor.
    pub fn set_scroll(&mut self, scroll: Point) {
        self.scroll = scroll;
    }

    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains_key(&node)
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }

    /// Current content and color of a text node.
    pub fn text(&self, node: NodeId) -> Option<(&str, Color)> {
        match &self.nodes.get(&node)?.kind {
            NodeKind::Text { text, style, .. } => Some((text.as_str(), style.color)),
            _ => None,
        }
    }

    /// Listeners subscribed to `event`, in subscription order. The caller
    /// delivers the event; the scene holds no callbacks.
    pub fn emit(&self, event: SceneEvent) -> Vec<ListenerId> {
        self.listeners
            .iter()
            .filter(|(_, e)| **e == event)
            .map(|(id, _)| *id)
            .collect()
    }

    /// Drop every node and listener.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.listeners.clear();
    }

    fn attach(&mut self, parent: NodeId, kind: NodeKind) -> NodeId {
        let id = NodeId(self.alloc());
        let Some(Node {
            kind: NodeKind::Container { children, .. },
            ..
        }) = self.nodes.get_mut(&parent)
        else {
            tracing::debug!(?parent, "attach to missing container ignored");
            return id;
        };
        children.push(id);
        self.nodes.insert(
            id,
            Node {
                parent: Some(parent),
                kind,
            },
        );
        id
    }

    fn remove_subtree(&mut self, node: NodeId) {
        let Some(removed) = self.nodes.remove(&node) else {
            return;
        };
        if let NodeKind::Container { children, .. } = removed.kind {
            for child in children {
                self.remove_subtree(child);
            }
        }
    }

    /// Flatten the scene into render commands, lowest depth first.
    pub fn render(&self) -> Vec<RenderCommand> {
        let mut roots: Vec<(i32, NodeId)> = self
            .roots
            .iter()
            .filter_map(|id| match &self.nodes.get(id)?.kind {
                NodeKind::Container { depth, .. } => Some((*depth, *id)),
                _ => None,
            })
            .collect();
        // Stable: equal depths keep insertion order.
        roots.sort_by_key(|(depth, _)| *depth);

        let mut commands = Vec::new();
        for (_, id) in roots {
            self.render_node(id, &mut commands);
        }
        commands
    }

    fn render_node(&self, id: NodeId, out: &mut Vec<RenderCommand>) {
        let Some(node) = self.nodes.get(&id) else {
            return;
        };
        match &node.kind {
            NodeKind::Container {
                position,
                depth,
                scroll_factor,
                children,
            } => {
                let translate = Point::new(
                    position.x - self.scroll.x * scroll_factor,
                    position.y - self.scroll.y * scroll_factor,
                );
                out.push(RenderCommand::BeginGroup {
                    id: SharedStr::from(format!("node-{}", id.0)),
                    depth: *depth,
                    fixed: *scroll_factor == 0.0,
                });
                out.push(RenderCommand::PushTransform { translate });
                for child in children {
                    self.render_node(*child, out);
                }
                out.push(RenderCommand::PopTransform);
                out.push(RenderCommand::EndGroup);
            }
            NodeKind::Rect { rect, fill } => out.push(RenderCommand::DrawRect {
                rect: *rect,
                paint: (*fill).into(),
                border: None,
            }),
            NodeKind::Text {
                position,
                text,
                style,
            } => out.push(RenderCommand::DrawText {
                position: *position,
                text: text.clone(),
                paint: style.color.into(),
                font_size: style.font_size,
                font: style.font,
                align: TextAlign::Left,
            }),
        }
    }
}

impl OverlayScene for DisplayScene {
    fn add_container(&mut self, position: Point, depth: i32, scroll_factor: f64) -> NodeId {
        let id = NodeId(self.alloc());
        self.nodes.insert(
            id,
            Node {
                parent: None,
                kind: NodeKind::Container {
                    position,
                    depth,
                    scroll_factor,
                    children: Vec::new(),
                },
            },
        );
        self.roots.push(id);
        id
    }

    fn add_rect(&mut self, parent: NodeId, rect: Rect, fill: Color) -> NodeId {
        self.attach(parent, NodeKind::Rect { rect, fill })
    }

    fn add_text(
        &mut self,
        parent: NodeId,
        position: Point,
        text: &str,
        style: TextStyle,
    ) -> NodeId {
        self.attach(
            parent,
            NodeKind::Text {
                position,
                text: SharedStr::from(text),
                style,
            },
        )
    }

    fn set_text(&mut self, node: NodeId, text: &str, color: Color) {
        if let Some(Node {
            kind: NodeKind::Text {
                text: current,
                style,
                ..
            },
            ..
        }) = self.nodes.get_mut(&node)
        {
            if current.as_str() != text {
                *current = SharedStr::from(text);
            }
            style.color = color;
        }
    }

    fn destroy(&mut self, node: NodeId) {
        let Some(parent) = self.nodes.get(&node).map(|n| n.parent) else {
            return;
        };
        match parent {
            Some(p) => {
                if let Some(Node {
                    kind: NodeKind::Container { children, .. },
                    ..
                }) = self.nodes.get_mut(&p)
                {
                    children.retain(|c| *c != node);
                }
            }
            None => self.roots.retain(|r| *r != node),
        }
        self.remove_subtree(node);
    }

    fn subscribe(&mut self, event: SceneEvent) -> ListenerId {
        let id = ListenerId(self.alloc());
        self.listeners.insert(id, event);
        id
    }

    fn unsubscribe(&mut self, listener: ListenerId) {
        self.listeners.remove(&listener);
    }
}

/// Shared handle to a [`DisplayScene`].
///
/// The host keeps one clone to render and emit events; an overlay owns
/// another to mutate its nodes. Borrows are short-lived and never held
/// across event delivery.
#[derive(Debug, Clone, Default)]
pub struct SceneHandle(Rc<RefCell<DisplayScene>>);

impl SceneHandle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn borrow(&self) -> Ref<'_, DisplayScene> {
        self.0.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, DisplayScene> {
        self.0.borrow_mut()
    }

    /// Deliver `event` to every subscribed listener through `target`.
    ///
    /// The subscriber list is collected before delivery, so `target` may
    /// subscribe or unsubscribe through its own handle while handling it.
    pub fn dispatch<L: SceneListener + ?Sized>(&self, event: SceneEvent, target: &mut L) {
        let listeners = self.0.borrow().emit(event);
        for listener in listeners {
            target.on_scene_event(listener, event);
        }
    }

    /// Emit `Shutdown` to `target`, then drop everything left in the scene.
    pub fn shutdown<L: SceneListener + ?Sized>(&self, target: &mut L) {
        self.dispatch(SceneEvent::Shutdown, target);
        self.0.borrow_mut().clear();
    }
}

impl OverlayScene for SceneHandle {
    fn add_container(&mut self, position: Point, depth: i32, scroll_factor: f64) -> NodeId {
        self.0
            .borrow_mut()
            .add_container(position, depth, scroll_factor)
    }

    fn add_rect(&mut self, parent: NodeId, rect: Rect, fill: Color) -> NodeId {
        self.0.borrow_mut().add_rect(parent, rect, fill)
    }

    fn add_text(
        &mut self,
        parent: NodeId,
        position: Point,
        text: &str,
        style: TextStyle,
    ) -> NodeId {
        self.0.borrow_mut().add_text(parent, position, text, style)
    }

    fn set_text(&mut self, node: NodeId, text: &str, color: Color) {
        self.0.borrow_mut().set_text(node, text, color);
    }

    fn destroy(&mut self, node: NodeId) {
        self.0.borrow_mut().destroy(node);
    }

    fn subscribe(&mut self, event: SceneEvent) -> ListenerId {
        self.0.borrow_mut().subscribe(event)
    }

    fn unsubscribe(&mut self, listener: ListenerId) {
        self.0.borrow_mut().unsubscribe(listener);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use resonador_protocol::FontFamily;

    fn style() -> TextStyle {
        TextStyle {
            font_size: 12.0,
            font: FontFamily::Monospace,
            color: Color::WHITE,
        }
    }

    #[test]
    fn destroying_container_removes_children() {
        let mut scene = DisplayScene::new();
        let c = scene.add_container(Point::new(10.0, 10.0), 5, 0.0);
        let r = scene.add_rect(c, Rect::new(0.0, 0.0, 10.0, 10.0), Color::BLACK);
        let t = scene.add_text(c, Point::ORIGIN, "hi", style());
        assert_eq!(scene.node_count(), 3);

        scene.destroy(c);
        assert_eq!(scene.node_count(), 0);
        assert!(!scene.contains(r));
        assert!(!scene.contains(t));
        assert!(scene.render().is_empty());

        // Second destroy is harmless.
        scene.destroy(c);
    }

    #[test]
    fn orphan_nodes_are_not_inserted() {
        let mut scene = DisplayScene::new();
        let t = scene.add_text(NodeId(999), Point::ORIGIN, "lost", style());
        assert!(!scene.contains(t));
        assert_eq!(scene.node_count(), 0);
    }

    #[test]
    fn render_orders_by_depth_and_pins_fixed_containers() {
        let mut scene = DisplayScene::new();
        let top = scene.add_container(Point::new(10.0, 10.0), 100, 0.0);
        scene.add_text(top, Point::ORIGIN, "top", style());
        let world = scene.add_container(Point::new(50.0, 0.0), 0, 1.0);
        scene.add_rect(world, Rect::new(0.0, 0.0, 4.0, 4.0), Color::BLACK);
        scene.set_scroll(Point::new(20.0, 0.0));

        let cmds = scene.render();
        let groups: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::BeginGroup { depth, fixed, .. } => Some((*depth, *fixed)),
                _ => None,
            })
            .collect();
        assert_eq!(groups, vec![(0, false), (100, true)]);

        let translates: Vec<_> = cmds
            .iter()
            .filter_map(|c| match c {
                RenderCommand::PushTransform { translate } => Some(*translate),
                _ => None,
            })
            .collect();
        assert_eq!(
            translates,
            vec![Point::new(30.0, 0.0), Point::new(10.0, 10.0)]
        );
    }

    #[test]
    fn emit_returns_only_matching_listeners() {
        let mut scene = DisplayScene::new();
        let u = scene.subscribe(SceneEvent::Update);
        let s = scene.subscribe(SceneEvent::Shutdown);
        assert_eq!(scene.emit(SceneEvent::Update), vec![u]);
        assert_eq!(scene.emit(SceneEvent::Shutdown), vec![s]);
        scene.unsubscribe(u);
        scene.unsubscribe(u);
        assert!(scene.emit(SceneEvent::Update).is_empty());
    }

    #[test]
    fn set_text_updates_content_and_color() {
        let mut scene = DisplayScene::new();
        let c = scene.add_container(Point::ORIGIN, 0, 0.0);
        let t = scene.add_text(c, Point::ORIGIN, "FPS: 60", style());
        let red = Color::from_hex(0xff0000);
        scene.set_text(t, "FPS: 12", red);
        assert_eq!(scene.text(t), Some(("FPS: 12", red)));
    }

    struct Recorder(Vec<(ListenerId, SceneEvent)>);

    impl SceneListener for Recorder {
        fn on_scene_event(&mut self, listener: ListenerId, event: SceneEvent) {
            self.0.push((listener, event));
        }
    }

    #[test]
    fn shutdown_notifies_then_clears() {
        let handle = SceneHandle::new();
        let mut writer = handle.clone();
        let l = writer.subscribe(SceneEvent::Shutdown);
        writer.add_container(Point::ORIGIN, 0, 0.0);

        let mut rec = Recorder(Vec::new());
        handle.shutdown(&mut rec);
        assert_eq!(rec.0, vec![(l, SceneEvent::Shutdown)]);
        assert_eq!(handle.borrow().node_count(), 0);
        assert_eq!(handle.borrow().listener_count(), 0);
    }
}
