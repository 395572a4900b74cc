/// Current UTC time as an RFC 3339 string with millisecond precision.
///
/// Used for the `lastUpdated` / `lastStaticDataUsage` markers on the tenant document.
pub fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}
