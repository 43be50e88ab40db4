use crate::Diagram;

/// One `d` attribute per drawable edge, in edge id order.
pub fn to_svg_paths_impl(d: &Diagram) -> Vec<String> {
    let mut paths = Vec::new();
    for e in d.edges.iter().flatten() {
        let core = e.core();
        if d.get_node(core.source_node_id()).is_none() || d.get_node(core.target_node_id()).is_none() {
            continue;
        }
        if let Some(path) = e.path_d() {
            paths.push(path);
        }
    }
    paths
}
