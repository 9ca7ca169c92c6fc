use super::*;

mod variables {
  use super::*;

  #[test]
  fn assign_and_get() {
    let mut variables = Variables::new();
    assert!(variables.is_empty());
    variables.assign("x", num(1.0));
    assert_eq!(variables.get("x"), Some(&num(1.0)));
    assert!(variables.contains("x"));
    assert_eq!(variables.get("y"), None);
    assert_eq!(variables.len(), 1);
  }

  #[test]
  fn reassign_replaces_value() {
    let mut variables = Variables::new();
    variables.assign("x", num(1.0));
    variables.assign("x", op("+", vec![var("y"), num(1.0)]));
    assert_eq!(variables.get("x").unwrap().to_string(), "y + 1");
    assert_eq!(variables.len(), 1);
  }

  #[test]
  fn remove_binding() {
    let mut variables = Variables::new();
    variables.assign("x", num(1.0));
    assert_eq!(variables.remove("x"), Some(num(1.0)));
    assert_eq!(variables.remove("x"), None);
    assert!(!variables.contains("x"));
  }

  #[test]
  fn names_are_sorted() {
    let mut variables = Variables::new();
    for name in ["zeta", "alpha", "mid"] {
      variables.assign(name, num(0.0));
    }
    assert_eq!(variables.names(), vec!["alpha", "mid", "zeta"]);
  }

  #[test]
  fn clear_keeps_the_global_frame() {
    let mut variables = Variables::new();
    variables.assign("x", num(1.0));
    variables.clear();
    assert!(variables.is_empty());
    assert_eq!(variables.depth(), 1);
    variables.assign("y", num(2.0));
    assert_eq!(variables.get("y"), Some(&num(2.0)));
  }
}

mod frames {
  use super::*;

  #[test]
  fn local_binding_disappears_with_its_frame() {
    let interpreter = Interpreter::new();
    let mut variables = Variables::new();
    let mut plotter = RecordingPlotter::default();
    {
      let mut env = Environment::new(&mut variables, &interpreter, &mut plotter);
      env
        .with_frame(|env| {
          env.variables_mut().bind_local("t", num(1.0));
          assert_eq!(env.variables().depth(), 2);
          assert_eq!(env.variables().get("t"), Some(&num(1.0)));
          Ok(())
        })
        .unwrap();
      assert_eq!(env.variables().depth(), 1);
    }
    assert!(!variables.contains("t"));
  }

  #[test]
  fn frame_is_popped_on_error() {
    let interpreter = Interpreter::new();
    let mut variables = Variables::new();
    let mut plotter = RecordingPlotter::default();
    {
      let mut env = Environment::new(&mut variables, &interpreter, &mut plotter);
      let result: Result<(), _> = env.with_frame(|env| {
        env.variables_mut().bind_local("t", num(1.0));
        Err(InterpreterError::EvaluationError("boom".into()))
      });
      assert!(result.is_err());
    }
    assert_eq!(variables.depth(), 1);
    assert!(!variables.contains("t"));
  }

  #[test]
  fn local_binding_shadows_global() {
    let interpreter = Interpreter::new();
    let mut variables = Variables::new();
    variables.assign("x", num(1.0));
    let mut plotter = RecordingPlotter::default();
    {
      let mut env = Environment::new(&mut variables, &interpreter, &mut plotter);
      env
        .with_frame(|env| {
          env.variables_mut().bind_local("x", num(2.0));
          assert_eq!(env.evaluate(&var("x")).unwrap(), num(2.0));
          // assign updates the innermost binding
          env.variables_mut().assign("x", num(3.0));
          assert_eq!(env.variables().get("x"), Some(&num(3.0)));
          assert_eq!(env.variables().len(), 1);
          Ok(())
        })
        .unwrap();
    }
    assert_eq!(variables.get("x"), Some(&num(1.0)));
  }

  #[test]
  fn assign_inside_frame_creates_global() {
    let interpreter = Interpreter::new();
    let mut variables = Variables::new();
    let mut plotter = RecordingPlotter::default();
    {
      let mut env = Environment::new(&mut variables, &interpreter, &mut plotter);
      env
        .with_frame(|env| {
          env.evaluate(&op(":=", vec![var("g"), num(4.0)])).map(|_| ())
        })
        .unwrap();
    }
    assert_eq!(variables.get("g"), Some(&num(4.0)));
  }
}

mod session {
  use super::*;

  #[test]
  fn variables_survive_between_inputs() {
    let mut session = Session::new();
    session.interpret("x := 2").unwrap();
    session.interpret("y := x * 3").unwrap();
    assert_eq!(session.variables().names(), vec!["x", "y"]);
    assert_eq!(session.interpret("y + x").unwrap(), "8");
  }

  #[test]
  fn clear_variables() {
    let mut session = Session::new();
    session.interpret("x := 2").unwrap();
    session.clear_variables();
    assert!(session.variables().is_empty());
    assert_eq!(session.interpret("x").unwrap(), "x");
  }

  #[test]
  fn failed_input_keeps_earlier_bindings() {
    let mut session = Session::new();
    session.interpret("x := 2").unwrap();
    assert!(session.interpret("toDouble(q)").is_err());
    assert_eq!(session.interpret("x").unwrap(), "2");
  }

  #[test]
  fn evaluate_prebuilt_tree() {
    let mut session = Session::new();
    let node = op("*", vec![num(6.0), num(7.0)]);
    assert_eq!(session.evaluate(&node).unwrap(), num(42.0));
  }
}
