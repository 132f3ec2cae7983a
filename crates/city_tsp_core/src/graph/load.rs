use std::path::Path;

use crate::{
    Error, Result,
    geo::GeoPoint,
    graph::{CityNetwork, Node},
    io::csv::{CsvRow, CsvTable},
};

pub const NODES_FILE: &str = "nodes.csv";
pub const EDGES_FILE: &str = "edges.csv";

/// Ids past this bound would make the dense adjacency table unreasonably large.
const MAX_NODE_ID: usize = 1 << 20;

const EDGE_FIELDS: usize = 3;
const LABELED_EDGE_FIELDS: usize = 5;
const NODE_FIELDS: usize = 3;

/// Shape of the input tables.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TableLayout {
    /// `origin,dest,dist` rows; nodes come from the edges.
    Plain,
    /// `origin,dest,dist,origin_label,dest_label` rows.
    Labeled,
    /// Separate `id,lat,lon` node table plus a plain edge table.
    Geo,
}

impl TableLayout {
    /// Layout of a single combined table, decided by the width of its first row.
    pub fn detect(table: &CsvTable) -> Result<Self> {
        let Some(first) = table.rows.first() else {
            return Ok(Self::Plain);
        };
        match first.width() {
            EDGE_FIELDS => Ok(Self::Plain),
            LABELED_EDGE_FIELDS => Ok(Self::Labeled),
            other => Err(Error::format(
                &table.name,
                first.line,
                format!(
                    "expected {EDGE_FIELDS} or {LABELED_EDGE_FIELDS} fields per row, got {other}"
                ),
            )),
        }
    }

    fn edge_width(self) -> usize {
        match self {
            Self::Plain | Self::Geo => EDGE_FIELDS,
            Self::Labeled => LABELED_EDGE_FIELDS,
        }
    }
}

impl CityNetwork {
    /// Builds a network from a dataset directory (`nodes.csv` + `edges.csv`) or a
    /// single combined edge table.
    pub fn from_source(source: &Path, is_directory: bool) -> Result<Self> {
        let mut network = Self::new();
        network.initialize(source, is_directory)?;
        Ok(network)
    }

    /// Clears the network and reloads it from `source`.
    pub fn initialize(&mut self, source: &Path, is_directory: bool) -> Result<()> {
        let layout = if is_directory {
            let nodes = CsvTable::read(&source.join(NODES_FILE))?;
            let edges = CsvTable::read(&source.join(EDGES_FILE))?;
            self.load_geo_tables(&nodes, &edges)?;
            TableLayout::Geo
        } else {
            let table = CsvTable::read(source)?;
            self.load_edge_table(&table)?
        };

        log::info!(
            "network: loaded source={} layout={layout:?} {self}",
            source.display()
        );
        Ok(())
    }

    /// Loads a node table with coordinates and an edge table, then completes edges.
    /// On error `self` keeps its previous contents.
    pub fn load_geo_tables(&mut self, nodes: &CsvTable, edges: &CsvTable) -> Result<()> {
        let mut loaded = Self::new();

        let (lat_idx, lon_idx) = coordinate_columns(nodes.header());
        for row in nodes.records() {
            expect_width(nodes, row, NODE_FIELDS)?;
            let id = parse_id(nodes, row, 0)?;
            let lat = parse_number(nodes, row, lat_idx, "latitude")?;
            let lon = parse_number(nodes, row, lon_idx, "longitude")?;
            let coord = GeoPoint::new(lat, lon);
            if !coord.is_valid() {
                return Err(Error::format(
                    &nodes.name,
                    row.line,
                    format!("coordinates out of range: {coord}"),
                ));
            }
            loaded.add_node(Node::new(id).with_coord(coord));
        }

        for row in edges.records() {
            expect_width(edges, row, EDGE_FIELDS)?;
            let (origin, dest, dist) = parse_edge(edges, row)?;
            loaded.add_edge(origin, dest, dist)?;
        }

        loaded.complete_edges();
        *self = loaded;
        Ok(())
    }

    /// Loads a combined edge table (plain or labeled), creating nodes from the edge
    /// endpoints, then completes edges. On error `self` keeps its previous contents.
    pub fn load_edge_table(&mut self, table: &CsvTable) -> Result<TableLayout> {
        let mut loaded = Self::new();

        let layout = TableLayout::detect(table)?;
        let width = layout.edge_width();
        for row in table.records() {
            expect_width(table, row, width)?;
            let (origin, dest, dist) = parse_edge(table, row)?;
            loaded.ensure_node(origin);
            loaded.ensure_node(dest);
            if layout == TableLayout::Labeled {
                loaded.set_label(origin, row.field(3))?;
                loaded.set_label(dest, row.field(4))?;
            }
            loaded.add_edge(origin, dest, dist)?;
        }

        loaded.complete_edges();
        *self = loaded;
        Ok(layout)
    }
}

/// Column indices of latitude and longitude; a header naming longitude first swaps them.
fn coordinate_columns(header: Option<&CsvRow>) -> (usize, usize) {
    let position = |needles: &[&str]| {
        header.and_then(|row| {
            row.fields.iter().position(|field| {
                let field = field.to_ascii_lowercase();
                needles.iter().any(|needle| field.starts_with(*needle))
            })
        })
    };

    match (position(&["lat"]), position(&["lon", "lng"])) {
        (Some(lat), Some(lon)) if lon < lat => (2, 1),
        _ => (1, 2),
    }
}

fn expect_width(table: &CsvTable, row: &CsvRow, width: usize) -> Result<()> {
    if row.width() != width {
        return Err(Error::format(
            &table.name,
            row.line,
            format!("expected {width} fields, got {}", row.width()),
        ));
    }
    Ok(())
}

fn parse_edge(table: &CsvTable, row: &CsvRow) -> Result<(usize, usize, f64)> {
    let origin = parse_id(table, row, 0)?;
    let dest = parse_id(table, row, 1)?;
    let dist = parse_number(table, row, 2, "distance")?;
    if dist < 0.0 {
        return Err(Error::format(
            &table.name,
            row.line,
            format!("negative distance {dist}"),
        ));
    }
    Ok((origin, dest, dist))
}

fn parse_id(table: &CsvTable, row: &CsvRow, idx: usize) -> Result<usize> {
    let raw = row.field(idx);
    let id = raw.parse::<usize>().map_err(|e| {
        Error::format(
            &table.name,
            row.line,
            format!("field {}: invalid node id {raw:?} ({e})", idx + 1),
        )
    })?;
    if id > MAX_NODE_ID {
        return Err(Error::format(
            &table.name,
            row.line,
            format!("field {}: node id {id} exceeds {MAX_NODE_ID}", idx + 1),
        ));
    }
    Ok(id)
}

fn parse_number(table: &CsvTable, row: &CsvRow, idx: usize, what: &str) -> Result<f64> {
    let raw = row.field(idx);
    match raw.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        Ok(_) => Err(Error::format(
            &table.name,
            row.line,
            format!("field {}: {what} must be finite, got {raw:?}", idx + 1),
        )),
        Err(e) => Err(Error::format(
            &table.name,
            row.line,
            format!("field {}: invalid {what} {raw:?} ({e})", idx + 1),
        )),
    }
}

#[cfg(test)]
mod tests {
    use std::{
        fs,
        path::PathBuf,
        time::{SystemTime, UNIX_EPOCH},
    };

    use super::{EDGES_FILE, NODES_FILE, TableLayout, coordinate_columns};
    use crate::{Error, graph::CityNetwork, io::csv::CsvTable};

    fn csv_table(name: &str, text: &str) -> CsvTable {
        CsvTable::parse(name, text).expect("csv")
    }

    fn unique_temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("clock should be after epoch")
            .as_nanos();
        std::env::temp_dir().join(format!("city-tsp-tests-{name}-{nanos}"))
    }

    const TOY_PLAIN: &str = "origem,destino,distancia\n0,1,10\n0,2,15\n1,2,35\n";
    const TOY_LABELED: &str = "origem,destino,distancia,label origem,label destino\n\
        0,1,1.2,museu,estadio\n1,2,2.5,estadio,ponte\n";

    #[test]
    fn detect_uses_first_row_width() {
        let plain = csv_table("p", TOY_PLAIN);
        let labeled = csv_table("l", TOY_LABELED);
        let bad = csv_table("b", "0,1\n");

        assert_eq!(TableLayout::detect(&plain).expect("plain"), TableLayout::Plain);
        assert_eq!(
            TableLayout::detect(&labeled).expect("labeled"),
            TableLayout::Labeled
        );
        assert!(matches!(
            TableLayout::detect(&bad),
            Err(Error::Format { line: 1, .. })
        ));
    }

    #[test]
    fn load_edge_table_with_header_creates_nodes_from_edges() {
        let mut network = CityNetwork::new();
        let layout = network
            .load_edge_table(&csv_table("toy", TOY_PLAIN))
            .expect("load");

        assert_eq!(layout, TableLayout::Plain);
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.fake_edge_count(), 0);
        assert_eq!(network.get_edge(2, 1).expect("edge").dist, 35.0);
    }

    #[test]
    fn load_edge_table_without_header_keeps_first_row() {
        let mut network = CityNetwork::new();
        network
            .load_edge_table(&csv_table("fc", "0,1,1\n1,2,2\n2,0,3\n"))
            .expect("load");
        assert_eq!(network.edge_count(), 3);
    }

    #[test]
    fn load_edge_table_reads_labels() {
        let mut network = CityNetwork::new();
        let layout = network
            .load_edge_table(&csv_table("tourism", TOY_LABELED))
            .expect("load");

        assert_eq!(layout, TableLayout::Labeled);
        assert_eq!(network.node(0).expect("node").label(), Some("museu"));
        assert_eq!(network.node(2).expect("node").label(), Some("ponte"));
        // 0 and 2 have no coordinates, so their completed edge is disconnected.
        assert_eq!(network.fake_edge_count(), 1);
        assert!(!network.get_edge(0, 2).expect("edge").is_valid());
    }

    #[test]
    fn wrong_row_width_is_a_format_error_with_line() {
        let mut network = CityNetwork::new();
        let err = network
            .load_edge_table(&csv_table("t.csv", "0,1,1\n1,2\n"))
            .expect_err("short row");
        assert!(matches!(err, Error::Format { line: 2, .. }));
        assert!(err.to_string().contains("t.csv"));
    }

    #[test]
    fn bad_numbers_are_format_errors() {
        let mut network = CityNetwork::new();
        for text in ["0,x,1\n", "0,1,far\n", "0,1,-4\n", "-1,1,4\n", "0,1,inf\n"] {
            let err = network
                .load_edge_table(&csv_table("t", text))
                .expect_err("bad field");
            assert!(matches!(err, Error::Format { .. }), "{text:?} gave {err}");
        }
    }

    #[test]
    fn geo_tables_complete_missing_pairs_with_haversine_edges() {
        let nodes = csv_table("nodes", "id,latitude,longitude\n0,0,0\n1,0,1\n2,1,0\n");
        let edges = csv_table("edges", "origem,destino,distancia\n0,1,100000\n");

        let mut network = CityNetwork::new();
        network.load_geo_tables(&nodes, &edges).expect("load");

        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 1);
        assert_eq!(network.fake_edge_count(), 2);
        assert_eq!(network.get_edge(1, 0).expect("real").dist, 100_000.0);
        let synthesized = network.get_edge(0, 2).expect("synthesized");
        assert!(!synthesized.is_real());
        assert!((synthesized.dist - 111_194.9).abs() < 1.0);
    }

    #[test]
    fn geo_edges_referencing_unknown_nodes_are_range_errors() {
        let nodes = csv_table("nodes", "0,0,0\n1,0,1\n");
        let edges = csv_table("edges", "0,9,5\n");

        let err = CityNetwork::new()
            .load_geo_tables(&nodes, &edges)
            .expect_err("unknown node");
        assert!(matches!(err, Error::Range { id: 9, .. }));
    }

    #[test]
    fn longitude_first_header_swaps_columns() {
        let header = csv_table("n", "id,longitude,latitude\n");
        let default = csv_table("n", "id,latitude,longitude\n");

        assert_eq!(coordinate_columns(header.header()), (2, 1));
        assert_eq!(coordinate_columns(default.header()), (1, 2));
        assert_eq!(coordinate_columns(None), (1, 2));

        let nodes = csv_table("n", "id,longitude,latitude\n0,-8.6,41.1\n");
        let mut network = CityNetwork::new();
        network
            .load_geo_tables(&nodes, &CsvTable::default())
            .expect("load");
        let coord = network.node(0).expect("node").coord().expect("coord");
        assert_eq!((coord.lat, coord.lon), (41.1, -8.6));
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let nodes = csv_table("n", "0,95,0\n");
        let err = CityNetwork::new()
            .load_geo_tables(&nodes, &CsvTable::default())
            .expect_err("latitude out of range");
        assert!(matches!(err, Error::Format { .. }));
    }

    #[test]
    fn initialize_reads_directory_and_single_file_sources() {
        let dir = unique_temp_dir("load");
        fs::create_dir_all(&dir).expect("create dir");
        fs::write(dir.join(NODES_FILE), "id,latitude,longitude\n0,0,0\n1,0,1\n2,1,1\n")
            .expect("write nodes");
        fs::write(dir.join(EDGES_FILE), "origem,destino,distancia\n0,1,5\n1,2,6\n")
            .expect("write edges");
        let single = dir.join("toy.csv");
        fs::write(&single, TOY_PLAIN).expect("write toy");

        let mut network = CityNetwork::new();
        network.initialize(&dir, true).expect("directory load");
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 2);
        assert_eq!(network.fake_edge_count(), 1);

        network.initialize(&single, false).expect("file load");
        assert_eq!(network.node_count(), 3);
        assert_eq!(network.edge_count(), 3);
        assert_eq!(network.fake_edge_count(), 0);

        let err = network
            .initialize(&dir.join("missing.csv"), false)
            .expect_err("missing file");
        assert!(matches!(err, Error::Io(_)));

        fs::remove_dir_all(&dir).expect("cleanup temp dir");
    }

    #[test]
    fn quoted_labels_may_contain_commas() {
        let text = "origem,destino,distancia,label origem,label destino\n\
            0,1,1.2,\"Museu, Porto\",estadio\n";
        let mut network = CityNetwork::new();
        let layout = network
            .load_edge_table(&csv_table("t.csv", text))
            .expect("load");

        assert_eq!(layout, TableLayout::Labeled);
        assert_eq!(network.node(0).expect("node").label(), Some("Museu, Porto"));
        assert_eq!(network.node(1).expect("node").label(), Some("estadio"));
    }

    #[test]
    fn failed_load_keeps_the_previous_network() {
        let mut network = CityNetwork::new();
        network
            .load_edge_table(&csv_table("toy", TOY_PLAIN))
            .expect("load");
        let before = network.to_string();

        network
            .load_edge_table(&csv_table("bad", "0,1,1\n1,2,2\n2,3\n"))
            .expect_err("short row");
        assert_eq!(network.to_string(), before);
        assert_eq!(network.get_edge(2, 1).expect("edge").dist, 35.0);

        let nodes = csv_table("nodes", "0,0,0\n1,0,1\n");
        let edges = csv_table("edges", "0,1,5\n0,9,5\n");
        network
            .load_geo_tables(&nodes, &edges)
            .expect_err("unknown node");
        assert_eq!(network.to_string(), before);
    }

    #[test]
    fn loading_twice_gives_identical_counts() {
        let table = csv_table("toy", TOY_PLAIN);
        let mut a = CityNetwork::new();
        let mut b = CityNetwork::new();
        a.load_edge_table(&table).expect("a");
        b.load_edge_table(&table).expect("b");
        a.load_edge_table(&table).expect("a reloaded");

        assert_eq!(a.to_string(), b.to_string());
    }
}
