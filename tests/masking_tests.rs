use errlogscope::masking::mask_line;

#[test]
fn masking_strips_shipping_prefix_and_qualified_names() {
    let line = "2025-12-17T20:41:23.711701291Z stdout F 2025-12-17 20:41:25 0 [ERROR] mariadbd: Table 'shop.orders' is marked as crashed and should be repaired";
    assert_eq!(
        mask_line(line),
        "<TIMESTAMP> <NUM> [ERROR] mariadbd: Table '<DB>.<TABLE>' is marked as crashed and should be repaired"
    );
}

#[test]
fn masking_bracketed_ids() {
    let line = "2025-01-01 10:00:00 [12345] [0x7f3a2b] connection lost after 30 seconds";
    assert_eq!(mask_line(line), "<TIMESTAMP> <PID> <CONN_ID> connection lost after <NUM> seconds");
}

#[test]
fn masking_iso_timestamp_without_prefix() {
    let line = "[ERROR] replica stopped at 2025-12-17T20:41:23.5Z";
    assert_eq!(mask_line(line), "[ERROR] replica stopped at <TIMESTAMP>");
}

#[test]
fn masking_paths_run_after_qualified_names() {
    let line = "[ERROR] Can't open file: '/var/lib/mysql/shop/orders.ibd' (errno: 2)";
    assert_eq!(mask_line(line), "[ERROR] Can't open file: '<PATH> (errno: <NUM>)");
}

#[test]
fn masking_numbers_only_when_standalone() {
    assert_eq!(mask_line("[Warning] host db1 retried 3 times"), "[Warning] host db1 retried <NUM> times");
    assert_eq!(mask_line("[Warning] buffer 12.000MiB"), "[Warning] buffer <NUM>.000MiB");
}

#[test]
fn masking_dotted_plugin_names_look_like_tables() {
    // Plugin file names share the db.table shape and are grouped the same way.
    assert_eq!(mask_line("[ERROR] Can't load plugin ha_rocksdb.so"), "[ERROR] Can't load plugin <DB>.<TABLE>");
}

#[test]
fn masking_is_deterministic() {
    let line = "2025-12-17 20:41:25 7 [ERROR] Deadlock found on `crm`.`accounts` [0xdead]";
    assert_eq!(mask_line(line), mask_line(line));
    assert_eq!(mask_line(line), "<TIMESTAMP> <NUM> [ERROR] Deadlock found on <DB>.<TABLE> <CONN_ID>");
}
