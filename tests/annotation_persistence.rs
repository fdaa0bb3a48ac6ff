use slidebound::container::PathContainer;
use slidebound::draw::{Shape, BLUE};
use slidebound::persist::xml;

#[test]
fn container_contents_survive_an_xml_round_trip() {
    let mut container = PathContainer::new();
    container.add_item(
        Shape::Freehand { points: vec![(0, 0), (5, 5), (10, 0)], color: BLUE, thick: 3.0 },
        0.0,
    );
    container.add_item(
        Shape::Rect { x: 2, y: 2, w: 40, h: 20, fill: true, color: BLUE, thick: 1.0 },
        1.0,
    );

    let page_shapes: xml::PageShapes = container
        .z_order()
        .into_iter()
        .filter_map(|id| container.get(id).map(|e| (e.item.clone(), e.z)))
        .collect();

    let xml_doc = xml::write_document(&[(0, page_shapes)]);
    let loaded = xml::read_document(&xml_doc).unwrap();

    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0].1.len(), 2);
    assert!(matches!(loaded[0].1[0].0, Shape::Freehand { .. }));
    assert!(matches!(loaded[0].1[1].0, Shape::Rect { fill: true, .. }));
}
