pub fn codeblock_fixture() -> &'static str {
    return r#"
Here's how to print in **Rust**.

```rust
fn print_numbers() {
    for i in 0..=10 {
        println!("{i}");
    }
}
```

And in *Javascript*.

```javascript
function printNumbers() {
    let numbers = [];
    for (let i = 0; i <= 10; i++) {
        numbers.push(i);
    }
    return numbers.join('\n');
}
```

This block has no language attached.

```
abc123
```

Let's do Python as well!

```python
for i in range(11):
    print(i)
```

That's it!
"#
    .trim();
}

pub fn long_first_message() -> &'static str {
    return "Hello world, this is a long first message exceeding thirty characters";
}
