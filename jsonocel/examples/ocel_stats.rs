use jsonocel::{apply, OCELImportOptions};
use std::env;
use std::error::Error;
use std::path::PathBuf;

fn main() -> Result<(), Box<dyn Error>> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 || args.len() > 3 {
        eprintln!(
            "Usage: {} <path_to_jsonocel_file> [object_attributes.csv]",
            args[0]
        );
        std::process::exit(1);
    }

    let path = PathBuf::from(&args[1]);
    let attributes_path = args.get(2).map(PathBuf::from);
    println!("Importing OCEL from {:?}", path);

    let ocel = apply(
        &path,
        &OCELImportOptions::default(),
        attributes_path.as_deref(),
    )?;
    println!("Successfully imported OCEL.");
    println!("Number of events: {}", ocel.obj.raw.events.len());
    println!("Number of objects: {}", ocel.obj.raw.objects.len());
    println!("Object Types: {:?}", ocel.obj.meta.obj_types);
    println!("Event attributes: {:?}", ocel.obj.meta.attr_events);
    for (attr, typ) in &ocel.obj.meta.attr_typ {
        println!("  {attr}: {typ}");
    }
    for (act, attrs) in &ocel.obj.meta.act_attr {
        println!("Activity {act:?} has attributes {attrs:?}");
    }
    println!("Table columns: {:?}", ocel.log.columns());
    println!(
        "Event graph: {} nodes, {} edges",
        ocel.graph.node_count(),
        ocel.graph.edge_count()
    );
    Ok(())
}
