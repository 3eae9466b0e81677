use crate::collections::rb_tree::*;
use crate::collections::TryReserveErrorKind;
use rand::{rngs::StdRng, Rng, SeedableRng};

const REP: usize = if cfg!(miri) { 2 } else { 100 };
const N: usize = if cfg!(miri) { 100 } else { 100000 };
const SMALL: usize = if cfg!(miri) { 50 } else { 1000 };

fn keys<K: Ord + Clone, V, A: Tuning>(t: &RBTree<K, V, A>) -> Vec<K> {
    let mut v = Vec::new();
    t.walk(|k, _| v.push(k.clone()));
    v
}

fn root_key<K: Clone, V, A: Tuning>(t: &RBTree<K, V, A>) -> K {
    t.arena[t.root.unwrap()].key.clone()
}

/// Pre-order (key, color) listing, used to compare shapes.
fn shape<K: Clone, V, A: Tuning>(t: &RBTree<K, V, A>) -> Vec<(K, Color)> {
    let mut out = Vec::new();
    let mut stack: Vec<Handle> = t.root.into_iter().collect();
    while let Some(h) = stack.pop() {
        let n = &t.arena[h];
        out.push((n.key.clone(), n.color));
        stack.extend(n.right);
        stack.extend(n.left);
    }
    out
}

fn links_ok<K, V, A: Tuning>(t: &RBTree<K, V, A>) {
    let mut stack: Vec<(Handle, Option<Handle>)> =
        t.root.into_iter().map(|h| (h, None)).collect();
    while let Some((h, parent)) = stack.pop() {
        let n = &t.arena[h];
        assert_eq!(n.parent, parent);
        stack.extend(n.left.map(|c| (c, Some(h))));
        stack.extend(n.right.map(|c| (c, Some(h))));
    }
}

#[test]
fn exp_empty_test() {
    let mut t: RBTree<u32, u32> = RBTree::new();
    assert!(t.is_empty());
    assert_eq!(t.size(), 0);
    assert_eq!(t.find(&1), None);
    assert_eq!(t.remove(&1), None);
    assert_eq!(t.remove_all(&1), 0);
    assert_eq!(t.height(), 0);
    t.check();
}

#[test]
fn exp_add_find_test() {
    let mut t = RBTree::new();
    for i in 0..SMALL {
        t.add(i, i * 10);
        t.check();
        assert_eq!(t.find(&i), Some(&(i * 10)));
        assert_eq!(t.size(), i + 1);
    }
    assert!(!t.is_empty());
    for i in 0..SMALL {
        assert_eq!(t[&i], i * 10);
    }
    assert_eq!(t.find(&SMALL), None);
}

#[test]
fn exp_line_then_red_uncle_test() {
    let mut t = RBTree::new();
    t.add(10, "ten");
    t.add(20, "twenty");
    t.add(30, "thirty");
    t.check();
    assert_eq!(root_key(&t), 20);
    assert_eq!(
        shape(&t),
        vec![(20, Color::Black), (10, Color::Red), (30, Color::Red)]
    );

    t.add(15, "fifteen");
    t.check();
    assert_eq!(
        shape(&t),
        vec![
            (20, Color::Black),
            (10, Color::Black),
            (15, Color::Red),
            (30, Color::Black)
        ]
    );
    assert_eq!(t.find(&15), Some(&"fifteen"));
}

#[test]
fn exp_triangle_test() {
    let mut t = RBTree::new();
    t.add(30, ());
    t.add(10, ());
    t.add(20, ());
    t.check();
    assert_eq!(
        shape(&t),
        vec![(20, Color::Black), (10, Color::Red), (30, Color::Red)]
    );
}

#[test]
fn exp_remove_two_children_test() {
    let mut t = RBTree::new();
    for i in 1..=7 {
        t.add(i, i * 100);
    }
    t.check();
    assert_eq!(
        shape(&t),
        vec![
            (2, Color::Black),
            (1, Color::Black),
            (4, Color::Red),
            (3, Color::Black),
            (6, Color::Black),
            (5, Color::Red),
            (7, Color::Red)
        ]
    );
    let old_slot = t.arena[t.root.unwrap()].right.unwrap();

    assert_eq!(t.remove(&4), Some(400));
    t.check();
    assert_eq!(t.size(), 6);
    assert_eq!(t.find(&4), None);
    // The successor's entry now sits where 4 was.
    assert_eq!(t.arena[old_slot].key, 5);
    assert_eq!(keys(&t), vec![1, 2, 3, 5, 6, 7]);
}

#[test]
fn exp_splice_right_child_test() {
    let mut t = RBTree::new();
    for i in 1..=7 {
        t.add(i, ());
    }
    // 6 has two children and its right child 7 has no left child.
    t.remove(&6);
    t.check();
    assert_eq!(
        shape(&t),
        vec![
            (2, Color::Black),
            (1, Color::Black),
            (4, Color::Red),
            (3, Color::Black),
            (7, Color::Black),
            (5, Color::Red)
        ]
    );
}

#[test]
fn exp_remove_root_test() {
    let mut t = RBTree::new();
    t.add(1, 'a');
    t.add(2, 'b');
    // Root with a single child.
    assert_eq!(t.remove(&1), Some('a'));
    t.check();
    assert_eq!(root_key(&t), 2);
    assert_eq!(t.remove(&2), Some('b'));
    t.check();
    assert!(t.is_empty());

    for i in 0..3 {
        t.add(i, 'x');
    }
    // Root with two children, right child has no left child.
    assert_eq!(t.remove(&1), Some('x'));
    t.check();
    assert_eq!(keys(&t), vec![0, 2]);
}

#[test]
fn exp_remove_absent_test() {
    let mut t = RBTree::new();
    for i in (0..SMALL).step_by(2) {
        t.add(i, i);
    }
    let before = shape(&t);
    let size = t.size();
    for i in (1..SMALL).step_by(2) {
        assert_eq!(t.remove(&i), None);
    }
    assert_eq!(t.size(), size);
    assert_eq!(shape(&t), before);
}

#[test]
fn exp_remove_orders_test() {
    let n = SMALL;
    let mut t = RBTree::new();
    for i in 0..n {
        t.add(i, i);
    }
    for i in 0..n {
        assert_eq!(t.remove(&i), Some(i));
        t.check();
    }
    assert!(t.is_empty());

    for i in 0..n {
        t.add(i, i);
    }
    for i in (0..n).rev() {
        assert_eq!(t.remove(&i), Some(i));
        t.check();
    }
    assert!(t.is_empty());

    let mut rng = StdRng::seed_from_u64(7);
    let mut order: Vec<usize> = (0..n).collect();
    for i in 0..n {
        t.add(i, i);
        let j = rng.gen_range(0..=i);
        order.swap(i, j);
    }
    for i in order {
        assert_eq!(t.remove(&i), Some(i));
        t.check();
    }
    assert!(t.is_empty());
}

#[test]
fn exp_duplicates_test() {
    let mut t = RBTree::new();
    t.add(5, "first");
    t.add(5, "second");
    t.check();
    assert_eq!(t.size(), 2);
    // The first insert stays the root, and search stops at the first match.
    assert_eq!(t.find(&5), Some(&"first"));

    t.add(3, "three");
    t.add(5, "third");
    t.add(7, "seven");
    t.check();
    assert_eq!(keys(&t), vec![3, 5, 5, 5, 7]);

    assert_eq!(t.remove_all(&5), 3);
    t.check();
    assert_eq!(t.find(&5), None);
    assert_eq!(t.size(), 2);
    assert_eq!(keys(&t), vec![3, 7]);
}

#[test]
fn exp_duplicate_chain_test() {
    let mut t = RBTree::new();
    for i in 0..SMALL {
        t.add(i % 10, i);
        t.check();
    }
    assert_eq!(t.remove_all(&4), SMALL / 10);
    t.check();
    assert!(!t.contains_key(&4));
    assert_eq!(t.size(), SMALL - SMALL / 10);
    for k in 0..10 {
        let removed = t.remove_all(&k);
        t.check();
        assert_eq!(removed, if k == 4 { 0 } else { SMALL / 10 });
    }
    assert!(t.is_empty());
}

#[test]
fn exp_random_test() {
    use std::collections::BTreeMap;
    let mut rng = StdRng::seed_from_u64(42);
    let mut t = RBTree::new();
    let mut oracle: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
    let mut len = 0;
    for id in 0..SMALL * 5 {
        let k = rng.gen_range(0..200);
        if rng.gen_bool(0.6) {
            t.add(k, id);
            oracle.entry(k).or_default().push(id);
            len += 1;
        } else {
            match t.remove(&k) {
                Some(v) => {
                    let ids = oracle.get_mut(&k).unwrap();
                    let pos = ids.iter().position(|x| *x == v).unwrap();
                    ids.swap_remove(pos);
                    if ids.is_empty() {
                        oracle.remove(&k);
                    }
                    len -= 1;
                }
                None => assert!(!oracle.contains_key(&k)),
            }
        }
        t.check();
        assert_eq!(t.size(), len);
        assert_eq!(t.contains_key(&k), oracle.contains_key(&k));
    }
    let expect: Vec<u32> = oracle
        .iter()
        .flat_map(|(k, ids)| std::iter::repeat(*k).take(ids.len()))
        .collect();
    assert_eq!(keys(&t), expect);
}

#[test]
fn exp_height_test() {
    let mut t = RBTree::new();
    for i in 0..N {
        t.add(i, ());
    }
    let bound = 2.0 * ((N + 1) as f64).log2();
    assert!(t.height() as f64 <= bound);
    for i in (0..N).step_by(3) {
        t.remove(&i);
    }
    let bound = 2.0 * ((t.size() + 1) as f64).log2();
    assert!(t.height() as f64 <= bound);
}

#[test]
fn exp_rotate_test() {
    let mut t = RBTree::new();
    for i in 0..15 {
        t.add(i, ());
    }
    let before = shape(&t);
    let order = keys(&t);
    let root = t.root.unwrap();

    t.rotate_left(root);
    links_ok(&t);
    assert_eq!(keys(&t), order);
    assert_ne!(t.root, Some(root));

    t.rotate_right(t.root.unwrap());
    links_ok(&t);
    assert_eq!(t.root, Some(root));
    assert_eq!(shape(&t), before);
    t.check();
}

#[test]
#[should_panic]
fn exp_rotate_without_child_test() {
    let mut t = RBTree::new();
    t.add(1, ());
    t.rotate_left(t.root.unwrap());
}

#[test]
fn exp_clone_test() {
    let mut original = RBTree::new();
    for i in 0..SMALL {
        original.add(i, i.to_string());
    }
    original.add(3, "dup".to_string());
    let mut copy = original.clone();
    copy.check();
    assert_eq!(copy.size(), original.size());
    assert_eq!(keys(&copy), keys(&original));

    copy.add(SMALL, "new".to_string());
    copy.remove(&0);
    assert_eq!(original.find(&SMALL), None);
    assert_eq!(original.find(&0), Some(&"0".to_string()));
    assert_eq!(copy.find(&0), None);
    original.check();
}

#[test]
fn exp_take_test() {
    let mut a = RBTree::with_tuning(CustomTuning::new(4));
    for i in 0..10 {
        a.add(i, i);
    }
    let b = a.take();
    assert!(a.is_empty());
    assert_eq!(a.find(&3), None);
    a.check();
    b.check();
    assert_eq!(b.size(), 10);
    assert_eq!(b.find(&3), Some(&3));

    // The emptied tree is still usable.
    a.add(1, 1);
    assert_eq!(a.size(), 1);
}

#[test]
fn exp_find_mut_test() {
    let mut t: RBTree<String, usize> = RBTree::new();
    t.add("apple".to_string(), 1);
    t.add("pear".to_string(), 2);
    *t.find_mut("apple").unwrap() += 10;
    assert_eq!(t.find("apple"), Some(&11));
    assert_eq!(t.get_key_value("pear"), Some((&"pear".to_string(), &2)));
    assert!(t.find_mut("plum").is_none());
}

#[test]
#[should_panic]
fn exp_index_missing_test() {
    let t: RBTree<u8, u8> = RBTree::new();
    let _ = t[&1];
}

#[test]
fn exp_debug_test() {
    let t: RBTree<_, _> = [(2, 'b'), (1, 'a'), (3, 'c')].into_iter().collect();
    assert_eq!(format!("{:?}", t), "{1: 'a', 2: 'b', 3: 'c'}");
}

#[test]
fn exp_slot_reuse_test() {
    let mut t = RBTree::new();
    for i in 0..100 {
        t.add(i, i);
    }
    let cap = t.arena.capacity();
    for i in 0..50 {
        t.remove(&i);
    }
    for i in 0..50 {
        t.add(i + 1000, i);
    }
    t.check();
    assert_eq!(t.arena.capacity(), cap);
}

#[test]
fn exp_release_test() {
    let mut t = RBTree::new();
    for i in 0..100 {
        t.add(i, i);
    }
    for i in 0..100 {
        t.remove(&i);
    }
    assert_eq!(t.arena.capacity(), 0);

    let mut t = RBTree::with_tuning(CustomTuning::new(u16::MAX));
    for i in 0..100 {
        t.add(i, i);
    }
    let cap = t.arena.capacity();
    t.clear();
    assert!(t.is_empty());
    assert_eq!(t.arena.capacity(), cap);
    t.check();
}

#[test]
fn exp_space_action_test() {
    let tune = CustomTuning::new(16);
    assert_eq!(tune.space_action((0, 16)), None);
    assert_eq!(tune.space_action((0, 17)), Some(0));
    assert_eq!(tune.space_action((4, 20)), None);
    assert_eq!(tune.space_action((4, 21)), Some(4));

    // Exactly one unit of storage survives emptying the tree.
    let mut t = RBTree::with_tuning(CustomTuning::new(16));
    for i in 0..10 {
        t.add(i, i);
    }
    assert_eq!(t.arena.capacity(), 16);
    for i in 0..10 {
        t.remove(&i);
    }
    assert!(t.is_empty());
    assert_eq!(t.arena.capacity(), 16);
}

#[test]
fn exp_try_reserve_test() {
    let mut t: RBTree<u64, u64> = RBTree::new();
    let e = t.try_reserve(usize::MAX).unwrap_err();
    assert!(matches!(e.kind(), TryReserveErrorKind::CapacityOverflow));
    assert!(t.try_add(1, 1).is_ok());
    assert_eq!(t.find(&1), Some(&1));
}

#[test]
fn exp_clear_test() {
    let _ = simplelog::TestLogger::init(
        simplelog::LevelFilter::Trace,
        simplelog::Config::default(),
    );
    let n = N;
    let mut t = RBTree::new();
    for i in 0..n {
        t.add(i as u32, 1u8);
    }
    t.clear();
    assert!(t.size() == 0);
    assert_eq!(t.find(&0), None);
    t.check();
}

#[test]
fn exp_mem_test() {
    let n = N * 10;
    let mut t = RBTree::new();
    for i in 0..n {
        t.add(i as u32, 1u8);
    }
    println!("Done insertions");
    print_memory();
    println!("Required memory: {} bytes", n * 5);
}

#[test]
fn std_mem_test() {
    let n = N * 10;
    let mut map = std::collections::BTreeMap::new();
    for i in 0..n {
        map.insert(i as u32, 1u8);
    }
    print_memory();
    println!("Required memory: {} bytes", n * 5);
}

#[test]
fn exp_get_test() {
    let mut t = RBTree::new();
    let n = N;
    for i in 0..n {
        t.add(i, i);
    }
    assert!(t.size() == n);
    print_memory();
    for _rep in 0..REP {
        for i in 0..n {
            assert!(t[&i] == i);
        }
    }
}

#[test]
fn std_get_test() {
    let mut m = std::collections::BTreeMap::new();
    let n = N;
    for i in 0..n {
        m.insert(i, i);
    }
    assert!(m.len() == n);
    print_memory();
    for _rep in 0..REP {
        for i in 0..n {
            assert!(m[&i] == i);
        }
    }
}
