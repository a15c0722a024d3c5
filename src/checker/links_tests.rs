use tempfile::TempDir;

use super::*;

fn source(dir: &TempDir, name: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(&path, "#!/usr/bin/env python\nprint('hi')\n").unwrap();
    path
}

#[test]
fn hard_link_is_created_beside_original_and_removed_on_drop() {
    let dir = TempDir::new().unwrap();
    let tool = source(&dir, "bin/tool");
    let registry = LinkRegistry::new();

    {
        let mut links = LinkSet::new(&registry);
        let linked = links.link(&tool, "py").unwrap();
        assert_eq!(linked, Linked::Created(dir.path().join("bin/tool.py")));
        assert!(dir.path().join("bin/tool.py").exists());
        assert_eq!(links.len(), 1);
        assert_eq!(registry.active_links(), vec![dir.path().join("bin/tool.py")]);
    }

    assert!(!dir.path().join("bin/tool.py").exists());
    assert!(tool.exists());
    assert!(registry.is_empty());
}

#[test]
fn link_is_registered_before_it_is_created() {
    let dir = TempDir::new().unwrap();
    let tool = source(&dir, "tool");
    let beside = dir.path().join("tool.py");
    let registry = LinkRegistry::new();
    let mut links = LinkSet::new(&registry);

    links
        .create_tracked(&beside, |link| {
            // A drain at this point must already know about the link.
            assert_eq!(registry.active_links(), vec![link.to_path_buf()]);
            fs::hard_link(&tool, link)
        })
        .unwrap();

    assert_eq!(links.len(), 1);
    drop(links);
    assert!(!beside.exists());
    assert!(registry.is_empty());
}

#[test]
fn failed_creation_leaves_no_record() {
    let dir = TempDir::new().unwrap();
    let registry = LinkRegistry::new();
    let mut links = LinkSet::new(&registry);

    let err = links
        .create_tracked(&dir.path().join("tool.py"), |_| {
            Err(io::Error::new(io::ErrorKind::PermissionDenied, "denied"))
        })
        .unwrap_err();

    assert_eq!(err.kind(), io::ErrorKind::PermissionDenied);
    assert!(links.is_empty());
    assert!(registry.is_empty());
}

#[test]
fn existing_name_is_a_collision_and_left_alone() {
    let dir = TempDir::new().unwrap();
    let tool = source(&dir, "tool");
    fs::write(dir.path().join("tool.py"), "keep me\n").unwrap();
    let registry = LinkRegistry::new();

    {
        let mut links = LinkSet::new(&registry);
        let linked = links.link(&tool, "py").unwrap();
        assert_eq!(linked, Linked::Collision(dir.path().join("tool.py")));
        assert!(links.is_empty());
        assert!(registry.is_empty());
    }

    assert_eq!(
        fs::read_to_string(dir.path().join("tool.py")).unwrap(),
        "keep me\n"
    );
}

#[cfg(unix)]
#[test]
fn symlink_fallback_lives_in_scratch_directory() {
    let dir = TempDir::new().unwrap();
    let registry = LinkRegistry::new();
    let missing = dir.path().join("vanished");

    let scratch_link = {
        let mut links = LinkSet::new(&registry);
        // Hard linking a missing file fails; the symbolic link still points at it.
        let Linked::Created(link) = links.link(&missing, "py").unwrap() else {
            panic!("expected a link");
        };
        assert!(!link.starts_with(dir.path()));
        assert!(link.symlink_metadata().unwrap().file_type().is_symlink());
        assert_eq!(fs::read_link(&link).unwrap(), missing);
        assert_eq!(link.file_name().unwrap(), "vanished.py");
        link
    };

    assert!(scratch_link.symlink_metadata().is_err());
    assert!(!scratch_link.parent().unwrap().exists());
    assert!(registry.is_empty());
}

#[test]
fn drain_removes_links_of_live_sets() {
    let dir = TempDir::new().unwrap();
    let a = source(&dir, "a");
    let b = source(&dir, "b");
    let registry = LinkRegistry::new();

    let mut links = LinkSet::new(&registry);
    links.link(&a, "py").unwrap();
    links.link(&b, "py").unwrap();

    // What the interrupt handler does while an invocation is running.
    assert_eq!(registry.drain(), 2);
    assert!(!dir.path().join("a.py").exists());
    assert!(!dir.path().join("b.py").exists());
    assert!(registry.is_empty());

    // Dropping afterwards tolerates the links being gone.
    drop(links);
    assert!(a.exists() && b.exists());
}

#[test]
fn links_are_removed_when_unwinding() {
    let dir = TempDir::new().unwrap();
    let tool = source(&dir, "tool");
    let registry = LinkRegistry::new();

    let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
        let mut links = LinkSet::new(&registry);
        links.link(&tool, "py").unwrap();
        panic!("checker blew up");
    }));

    assert!(result.is_err());
    assert!(!dir.path().join("tool.py").exists());
    assert!(registry.is_empty());
}

#[test]
fn append_extension_keeps_existing_dots() {
    assert_eq!(
        append_extension(Path::new("/a/b.c/tool.v2"), "py"),
        PathBuf::from("/a/b.c/tool.v2.py")
    );
}
