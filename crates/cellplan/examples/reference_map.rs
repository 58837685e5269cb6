//! Decompose the reference map and print its cells and one planned path.
//!
//! Run: `cargo run -p cellplan --example reference_map`

use cellplan::fixtures::reference_scene;
use cellplan::geom2::{MapLayout, Point};
use cellplan::{Decomposition, PlanCfg};

fn main() {
    let scene = reference_scene().expect("reference map is valid");
    let d = Decomposition::build(&scene, PlanCfg::default()).expect("reference map decomposes");

    println!(
        "cells={} nodes={} edges={} free_area={:.1} covered={:.1}",
        d.cells().len(),
        d.graph().num_nodes(),
        d.graph().num_edges(),
        scene.free_area(),
        d.covered_area()
    );
    for (i, c) in d.cells().iter().enumerate() {
        println!(
            "cell {i:2}: x {:6.1} .. {:6.1}  left [{:6.1}, {:6.1}] {:?}  \
             right [{:6.1}, {:6.1}] {:?}",
            c.left.x,
            c.right.x,
            c.left.y_top,
            c.left.y_bottom,
            c.left_kind,
            c.right.y_top,
            c.right.y_bottom,
            c.right_kind
        );
    }

    let layout = MapLayout::reference();
    // world coordinates: lower-left region to lower-right region
    let start = layout.to_screen(Point::new(0.5, 5.0));
    let goal = layout.to_screen(Point::new(9.7, 5.0));
    let path = d.shortest_path(start, goal).expect("both points are free");
    println!("path length={:.3} waypoints={}", path.length, path.waypoints.len());
    for w in &path.waypoints {
        let world = layout.to_world(*w).unwrap_or(*w);
        println!("  ({:7.2}, {:7.2})  world ({:5.2}, {:5.2})", w.x, w.y, world.x, world.y);
    }
}
