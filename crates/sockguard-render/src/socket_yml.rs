use sockguard_types::SocketYml;

/// Serialize a resolved document. Key order follows [`SocketYml`]'s field order.
pub fn render_socket_yml(doc: &SocketYml) -> Result<String, serde_yaml_ng::Error> {
    serde_yaml_ng::to_string(doc)
}
