/// Derives the dataset metadata URL from a server address and dataset id.
///
/// If `ip` already starts with `http://`, it is used literally as the
/// scheme+host prefix; otherwise `https://` is prepended. This matches the
/// server's convention of accepting either a bare host (assumed secured) or
/// an explicit scheme for local/plain-HTTP testing.
pub fn dataset_url(ip: &str, port: u16, uuid: &str) -> String {
    let scheme = if ip.starts_with("http://") { "" } else { "https://" };
    format!("{scheme}{ip}:{port}/datasets/{uuid}")
}
